use crate::current_timestamp;
use parking_lot::Mutex;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

/// Accounting namespace a counter or delta belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceKind {
    Inbound,
    Outbound,
    User,
}

impl ResourceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceKind::Inbound => "inbound",
            ResourceKind::Outbound => "outbound",
            ResourceKind::User => "user",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Download,
    Upload,
}

/// One observation of bytes moved for one tag/direction pair since the
/// previous drain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrafficDelta {
    pub timestamp: i64,
    pub resource: ResourceKind,
    pub tag: String,
    pub direction: Direction,
    pub bytes: u64,
}

/// Per-tag accumulator pair. Increments and the drain's swap-to-zero operate
/// on the same atomics, so a byte counted concurrently with a drain lands in
/// exactly one cycle.
#[derive(Debug, Default)]
pub struct TrafficCounter {
    read: AtomicU64,
    write: AtomicU64,
}

impl TrafficCounter {
    pub fn record_read(&self, bytes: u64) {
        self.read.fetch_add(bytes, Ordering::Relaxed);
    }

    pub fn record_write(&self, bytes: u64) {
        self.write.fetch_add(bytes, Ordering::Relaxed);
    }

    /// Bytes read since the last drain.
    pub fn read_bytes(&self) -> u64 {
        self.read.load(Ordering::Relaxed)
    }

    /// Bytes written since the last drain.
    pub fn written_bytes(&self) -> u64 {
        self.write.load(Ordering::Relaxed)
    }

    fn take(&self) -> (u64, u64) {
        (
            self.read.swap(0, Ordering::Relaxed),
            self.write.swap(0, Ordering::Relaxed),
        )
    }
}

/// Counters resolved for one connection, up to one per namespace. Increments
/// fan out to each member independently; there is no cross-counter
/// transaction.
#[derive(Clone, Default)]
pub struct CounterSet {
    counters: Vec<Arc<TrafficCounter>>,
}

impl CounterSet {
    pub fn add_read(&self, bytes: u64) {
        for counter in &self.counters {
            counter.record_read(bytes);
        }
    }

    pub fn add_write(&self, bytes: u64) {
        for counter in &self.counters {
            counter.record_write(bytes);
        }
    }

    pub fn len(&self) -> usize {
        self.counters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counters.is_empty()
    }
}

#[derive(Default)]
struct Namespaces {
    inbounds: HashMap<String, Arc<TrafficCounter>>,
    outbounds: HashMap<String, Arc<TrafficCounter>>,
    users: HashMap<String, Arc<TrafficCounter>>,
}

impl Namespaces {
    fn map_mut(&mut self, kind: ResourceKind) -> &mut HashMap<String, Arc<TrafficCounter>> {
        match kind {
            ResourceKind::Inbound => &mut self.inbounds,
            ResourceKind::Outbound => &mut self.outbounds,
            ResourceKind::User => &mut self.users,
        }
    }
}

/// Traffic counters for the three accounting namespaces. The mutex guards map
/// insertion and the drain sweep only; increments go straight to the resolved
/// `Arc<TrafficCounter>` without locking.
pub struct TrafficRegistry {
    access: Mutex<Namespaces>,
}

impl TrafficRegistry {
    pub fn new() -> Self {
        Self {
            access: Mutex::new(Namespaces::default()),
        }
    }

    /// Existing counter for the tag, or a fresh zeroed one. Empty tags carry
    /// no counter.
    pub fn resolve(&self, kind: ResourceKind, tag: &str) -> Option<Arc<TrafficCounter>> {
        if tag.is_empty() {
            return None;
        }
        let mut namespaces = self.access.lock();
        Some(load_or_create(namespaces.map_mut(kind), tag))
    }

    /// Resolve every counter attributed to one connection under a single lock
    /// acquisition. No ordering guarantee across tags.
    pub fn resolve_set(&self, inbound: &str, outbound: &str, user: &str) -> CounterSet {
        let mut counters = Vec::with_capacity(3);
        let mut namespaces = self.access.lock();
        if !inbound.is_empty() {
            counters.push(load_or_create(&mut namespaces.inbounds, inbound));
        }
        if !outbound.is_empty() {
            counters.push(load_or_create(&mut namespaces.outbounds, outbound));
        }
        if !user.is_empty() {
            counters.push(load_or_create(&mut namespaces.users, user));
        }
        CounterSet { counters }
    }

    /// Swap every accumulator to zero and emit one delta per direction with a
    /// nonzero prior value. Holds the structural lock for the whole sweep;
    /// cost is bounded by the number of distinct tags, not connections.
    pub fn drain_all(&self) -> Vec<TrafficDelta> {
        let namespaces = self.access.lock();
        let timestamp = current_timestamp();
        let mut deltas = Vec::new();

        for (resource, map) in [
            (ResourceKind::Inbound, &namespaces.inbounds),
            (ResourceKind::Outbound, &namespaces.outbounds),
            (ResourceKind::User, &namespaces.users),
        ] {
            for (tag, counter) in map {
                let (up, down) = counter.take();
                if down > 0 {
                    deltas.push(TrafficDelta {
                        timestamp,
                        resource,
                        tag: tag.clone(),
                        direction: Direction::Download,
                        bytes: down,
                    });
                }
                if up > 0 {
                    deltas.push(TrafficDelta {
                        timestamp,
                        resource,
                        tag: tag.clone(),
                        direction: Direction::Upload,
                        bytes: up,
                    });
                }
            }
        }
        deltas
    }
}

impl Default for TrafficRegistry {
    fn default() -> Self {
        Self::new()
    }
}

fn load_or_create(
    map: &mut HashMap<String, Arc<TrafficCounter>>,
    tag: &str,
) -> Arc<TrafficCounter> {
    if let Some(counter) = map.get(tag) {
        return counter.clone();
    }
    let counter = Arc::new(TrafficCounter::default());
    map.insert(tag.to_string(), counter.clone());
    counter
}
