//! Server definitions.
//!
//! Text format shared with libketama's `ketama.servers` files: one server per
//! line, identifier and weight separated by whitespace. Blank lines and
//! anything after `#` are ignored.
//!
//! ```text
//! # mc1
//! 10.0.1.1:11211  600
//! 10.0.1.2:11211  300   # half the memory
//! ```

use {
    super::{RingError, RingResult, ServerSet},
    std::str::FromStr,
};

fn invalid(line: usize, reason: impl Into<String>) -> RingError {
    RingError::InvalidDefinition {
        line,
        reason: reason.into(),
    }
}

impl FromStr for ServerSet {
    type Err = RingError;

    fn from_str(s: &str) -> RingResult<Self> {
        let mut servers = ServerSet::new();
        for (idx, line) in s.lines().enumerate() {
            let line_no = idx + 1;
            let line = match line.split_once('#') {
                Some((content, _)) => content,
                None => line,
            };

            let mut fields = line.split_whitespace();
            let Some(id) = fields.next() else {
                continue;
            };
            let Some(weight) = fields.next() else {
                return Err(invalid(line_no, format!("missing weight for `{id}`")));
            };
            if let Some(extra) = fields.next() {
                return Err(invalid(line_no, format!("unexpected field `{extra}`")));
            }

            let weight = weight
                .parse::<u64>()
                .map_err(|e| invalid(line_no, format!("invalid weight `{weight}`: {e}")))?;
            servers.add_server(id, weight);
        }

        Ok(servers)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_definitions() {
        let servers: ServerSet = "
            # primary pool
            10.0.1.1:11211\t600
            10.0.1.2:11211  300   # half the memory

            10.0.1.3:11211 0
        "
        .parse()
        .unwrap();

        let parsed: Vec<_> = servers.iter().map(|s| (s.id(), s.weight())).collect();
        assert_eq!(
            parsed,
            vec![
                ("10.0.1.1:11211", 600),
                ("10.0.1.2:11211", 300),
                ("10.0.1.3:11211", 0),
            ]
        );
        assert_eq!(servers.total_weight(), 900);
    }

    #[test]
    fn empty_definitions() {
        let servers: ServerSet = "# nothing here\n\n".parse().unwrap();
        assert!(servers.is_empty());
    }

    #[test]
    fn invalid_definitions() {
        let err = "a:1 10\nb:1".parse::<ServerSet>().unwrap_err();
        assert!(matches!(err, RingError::InvalidDefinition { line: 2, .. }));

        let err = "a:1 ten".parse::<ServerSet>().unwrap_err();
        assert!(matches!(err, RingError::InvalidDefinition { line: 1, .. }));

        let err = "a:1 -5".parse::<ServerSet>().unwrap_err();
        assert!(matches!(err, RingError::InvalidDefinition { line: 1, .. }));

        let err = "a:1 10 20".parse::<ServerSet>().unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid server definition at line 1: unexpected field `20`"
        );
    }
}
