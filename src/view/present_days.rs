use std::collections::HashMap;

/// Ticket handed out when a present-day fetch starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct RequestToken(u64);

/// Present-day counts keyed by business key.
///
/// Fetches may resolve out of order, so every fetch takes a [`RequestToken`]
/// from [`begin`](Self::begin) and its result is applied only when that token
/// is still the latest one issued for the key. Entries are never expired;
/// [`clear`](Self::clear) is the only invalidation.
#[derive(Debug, Default)]
pub struct PresentDayCounts {
    counts: HashMap<String, u32>,
    latest: HashMap<String, RequestToken>,
    next_token: u64,
}

impl PresentDayCounts {
    pub fn get(&self, employee_id: &str) -> Option<u32> {
        self.counts.get(employee_id).copied()
    }

    pub fn is_cached(&self, employee_id: &str) -> bool {
        self.counts.contains_key(employee_id)
    }

    /// A fetch for `employee_id` is already in flight.
    #[cfg(test)]
    pub fn is_pending(&self, employee_id: &str) -> bool {
        self.latest.contains_key(employee_id)
    }

    pub fn begin(&mut self, employee_id: &str) -> RequestToken {
        self.next_token += 1;
        let token = RequestToken(self.next_token);
        self.latest.insert(employee_id.to_string(), token);
        token
    }

    /// Stores `count` if `token` is the newest for `employee_id`.
    /// Returns whether the value was applied.
    pub fn complete(&mut self, employee_id: &str, token: RequestToken, count: u32) -> bool {
        if self.latest.get(employee_id) != Some(&token) {
            return false;
        }
        self.latest.remove(employee_id);
        self.counts.insert(employee_id.to_string(), count);
        true
    }

    /// Drops the pending marker of a failed fetch; the cached value, if any,
    /// stays.
    pub fn abandon(&mut self, employee_id: &str, token: RequestToken) {
        if self.latest.get(employee_id) == Some(&token) {
            self.latest.remove(employee_id);
        }
    }

    /// Forgets every count. Tokens keep increasing so fetches started before
    /// the clear cannot write afterwards.
    pub fn clear(&mut self) {
        self.counts.clear();
        self.latest.clear();
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}
