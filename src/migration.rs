use {
    super::{Ring, interval::KeyRange},
    std::sync::Arc,
};

/// Arc of the circle that changes owner between two rings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Move {
    key_range: KeyRange,
    from: Arc<str>,
    to: Arc<str>,
}

impl Move {
    /// Returns the key range that changes owner.
    pub fn key_range(&self) -> &KeyRange {
        &self.key_range
    }

    /// Server that owned the range in the old ring.
    pub fn from(&self) -> &str {
        &self.from
    }

    /// Server that owns the range in the new ring.
    pub fn to(&self) -> &str {
        &self.to
    }
}

/// Data migration plan.
///
/// Computed by comparing an old ring with its replacement: every range of
/// the circle whose owner differs ends up in the plan. With equally weighted
/// servers, removing one only moves the ranges it owned, and adding one only
/// moves the ranges it takes over.
#[derive(Debug, Clone, Default)]
pub struct MigrationPlan {
    moves: Vec<Move>,
}

impl MigrationPlan {
    /// Creates a new migration plan.
    pub fn new<A, B>(old: &Ring<A>, new: &Ring<B>) -> Self {
        // Positions of both rings split the circle into segments in which
        // neither ring changes owner.
        let mut bounds: Vec<u32> = old
            .points()
            .iter()
            .chain(new.points())
            .map(|point| point.position())
            .collect();
        bounds.sort_unstable();
        bounds.dedup();

        let mut moves: Vec<Move> = Vec::new();
        for (idx, &end) in bounds.iter().enumerate() {
            let from = old.owner_at(end).shared_owner();
            let to = new.owner_at(end).shared_owner();
            if from == to {
                continue;
            }

            let start = if idx == 0 {
                bounds[bounds.len() - 1]
            } else {
                bounds[idx - 1]
            };

            // Coalesce with the previous segment.
            if let Some(last) = moves.last_mut() {
                if last.key_range.end() == start && last.from == *from && last.to == *to {
                    last.key_range = last.key_range.extend_to(end);
                    continue;
                }
            }

            let key_range = if idx == 0 {
                KeyRange::Wrapping(start, end)
            } else {
                KeyRange::Bounded(start, end)
            };
            moves.push(Move {
                key_range,
                from: from.clone(),
                to: to.clone(),
            });
        }

        Self { moves }
    }

    /// All ranges that change owner.
    pub fn moves(&self) -> &[Move] {
        &self.moves
    }

    /// Ranges the given server has to hand over.
    pub fn moves_from<'a>(&'a self, id: &'a str) -> impl Iterator<Item = &'a Move> {
        self.moves.iter().filter(move |m| m.from() == id)
    }

    /// Ranges the given server has to pull in.
    pub fn moves_to<'a>(&'a self, id: &'a str) -> impl Iterator<Item = &'a Move> {
        self.moves.iter().filter(move |m| m.to() == id)
    }

    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    /// Share of the circle that changes owner, in `[0, 1]`.
    pub fn remapped_fraction(&self) -> f64 {
        let moved: u64 = self.moves.iter().map(|m| m.key_range.span()).sum();
        moved as f64 / (1u64 << 32) as f64
    }
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        crate::{ServerSet, build_ring},
    };

    fn servers(count: usize) -> ServerSet {
        (0..count).map(|i| (format!("10.0.0.{i}:11211"), 100)).collect()
    }

    #[test]
    fn identical_rings() {
        let ring = build_ring(&servers(3)).unwrap();
        let plan = MigrationPlan::new(&ring, &ring.clone());
        assert!(plan.is_empty());
        assert_eq!(plan.remapped_fraction(), 0.0);
    }

    #[test]
    fn server_removed() {
        let mut set = servers(5);
        let old = build_ring(&set).unwrap();
        set.remove_server("10.0.0.2:11211");
        let new = build_ring(&set).unwrap();

        let plan = MigrationPlan::new(&old, &new);
        assert!(!plan.is_empty());
        assert_eq!(plan.moves_from("10.0.0.2:11211").count(), plan.moves().len());
        assert_eq!(plan.moves_to("10.0.0.2:11211").count(), 0);

        // The removed server's arcs are exactly what moves.
        let owned: u64 = old
            .intervals("10.0.0.2:11211")
            .iter()
            .map(|i| i.key_range().span())
            .sum();
        let moved: u64 = plan.moves().iter().map(|m| m.key_range().span()).sum();
        assert_eq!(owned, moved);

        let fraction = plan.remapped_fraction();
        assert!((0.1..0.3).contains(&fraction), "remapped {fraction}");

        // Every moved range is routed consistently by both rings.
        for m in plan.moves() {
            let position = m.key_range().end();
            assert_eq!(old.owner_at(position).owner(), m.from());
            assert_eq!(new.owner_at(position).owner(), m.to());
        }
    }

    #[test]
    fn server_added() {
        let mut set = servers(4);
        let old = build_ring(&set).unwrap();
        set.add_server("10.0.0.4:11211", 100);
        let new = build_ring(&set).unwrap();

        // Rounds per server stay at 40 with equal weights, so existing points
        // keep their positions.
        let plan = MigrationPlan::new(&old, &new);
        assert_eq!(plan.moves_to("10.0.0.4:11211").count(), plan.moves().len());

        let fraction = plan.remapped_fraction();
        assert!((0.1..0.3).contains(&fraction), "remapped {fraction}");
    }
}
