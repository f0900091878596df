use std::{fmt, sync::Arc};

/// Backend server that owns a portion of the hash circle.
///
/// The weight is an arbitrary number (normally memory size of the cache
/// server) that determines what portion of the circle the server controls.
/// Weights of all servers are summed up to determine the total weight, and
/// the relative weight of the server is the ratio of the two.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Server {
    id: Arc<str>,
    weight: u64,
}

impl Server {
    /// Creates a new server record.
    pub fn new(id: impl Into<Arc<str>>, weight: u64) -> Self {
        Self {
            id: id.into(),
            weight,
        }
    }

    /// Returns the server identifier, normally `host:port`.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns a shared handle to the identifier.
    pub(crate) fn shared_id(&self) -> &Arc<str> {
        &self.id
    }

    /// Relative capacity of the server.
    pub fn weight(&self) -> u64 {
        self.weight
    }
}

impl fmt::Display for Server {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.id, self.weight)
    }
}

/// Insertion-ordered collection of servers.
///
/// The set is a plain snapshot: rings are built from it, but never observe
/// later changes. Whenever the set changes, build a new ring.
///
/// No duplicate detection is done: adding the same identifier twice inserts
/// two independent records.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServerSet {
    servers: Vec<Server>,
    total_weight: u64,
}

impl ServerSet {
    /// Creates a new empty server set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a server to the set.
    ///
    /// Total weight saturates at `u64::MAX`; ring construction reports
    /// overflow as an error.
    pub fn add_server(&mut self, id: impl Into<Arc<str>>, weight: u64) -> &mut Self {
        self.servers.push(Server::new(id, weight));
        self.total_weight = self.total_weight.saturating_add(weight);
        self
    }

    /// Appends a server addressed by host and port, i.e. `host:port`.
    pub fn add_host(&mut self, host: &str, port: u16, weight: u64) -> &mut Self {
        self.add_server(format!("{host}:{port}"), weight)
    }

    /// Removes all records with the given identifier.
    ///
    /// Returns the number of removed records.
    pub fn remove_server(&mut self, id: &str) -> usize {
        let before = self.servers.len();
        self.servers.retain(|server| server.id() != id);
        self.total_weight = self
            .servers
            .iter()
            .fold(0u64, |acc, server| acc.saturating_add(server.weight()));
        before - self.servers.len()
    }

    /// Number of server records in the set.
    pub fn server_count(&self) -> usize {
        self.servers.len()
    }

    /// Sum of all server weights.
    pub fn total_weight(&self) -> u64 {
        self.total_weight
    }

    pub fn is_empty(&self) -> bool {
        self.servers.is_empty()
    }

    /// Iterator over the servers, in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Server> {
        self.servers.iter()
    }

    pub(crate) fn as_slice(&self) -> &[Server] {
        &self.servers
    }
}

impl<S: Into<Arc<str>>> FromIterator<(S, u64)> for ServerSet {
    fn from_iter<I: IntoIterator<Item = (S, u64)>>(iter: I) -> Self {
        let mut servers = Self::new();
        for (id, weight) in iter {
            servers.add_server(id, weight);
        }
        servers
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check_server(server: &Server, id: &str, weight: u64) {
        assert_eq!(server.id(), id);
        assert_eq!(server.weight(), weight);
    }

    #[test]
    fn basic_ops() {
        let mut servers = ServerSet::new();
        assert!(servers.is_empty());

        (0..5).for_each(|i| {
            servers.add_server(format!("10.0.0.{i}:11211"), 10 * (i + 1));
        });
        assert_eq!(servers.server_count(), 5);
        assert_eq!(servers.total_weight(), 150);

        // Insertion order is preserved.
        for (i, server) in servers.iter().enumerate() {
            check_server(server, &format!("10.0.0.{i}:11211"), 10 * (i as u64 + 1));
        }

        assert_eq!(servers.remove_server("10.0.0.3:11211"), 1);
        assert_eq!(servers.server_count(), 4);
        assert_eq!(servers.total_weight(), 110);
        assert_eq!(servers.remove_server("10.0.0.3:11211"), 0);
    }

    #[test]
    fn duplicates_are_independent_records() {
        let mut servers = ServerSet::new();
        servers.add_server("a:1", 1).add_server("a:1", 2);
        assert_eq!(servers.server_count(), 2);
        assert_eq!(servers.total_weight(), 3);

        assert_eq!(servers.remove_server("a:1"), 2);
        assert!(servers.is_empty());
        assert_eq!(servers.total_weight(), 0);
    }

    #[test]
    fn host_formatting() {
        let mut servers = ServerSet::new();
        servers.add_host("127.0.0.1", 11211, 64);
        let server = servers.iter().next().unwrap();
        check_server(server, "127.0.0.1:11211", 64);
        assert_eq!(server.to_string(), "127.0.0.1:11211 (64)");
    }

    #[test]
    fn total_weight_saturates() {
        let servers: ServerSet = [("a", u64::MAX), ("b", 1)].into_iter().collect();
        assert_eq!(servers.total_weight(), u64::MAX);
    }
}
