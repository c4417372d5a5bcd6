use std::fmt;

/// Relative `(d_row, d_col)` offset of a neighbor.
pub type Offset = (isize, isize);

const ORTHOGONAL_4: [Offset; 4] = [(0, -1), (0, 1), (-1, 0), (1, 0)];

const HEX_6A: [Offset; 6] = [(0, -1), (0, 1), (-1, 0), (1, 0), (1, -1), (-1, 1)];

const MOORE_8: [Offset; 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

const DIAGONAL_4: [Offset; 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];

const HEX_6B: [Offset; 6] = [(-1, -1), (-1, 1), (1, -1), (1, 1), (0, -1), (0, 1)];

/// Neighbor topologies selectable by id (`n=` on the command line).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Topology {
    /// id 1: the four orthogonal neighbors.
    Orthogonal4,
    /// id 2: orthogonal neighbors plus the (1,-1) / (-1,1) diagonal.
    Hex6A,
    /// id 3: all eight surrounding cells. The default.
    Moore8,
    /// id 4: the four diagonal neighbors.
    Diagonal4,
    /// id 5: the four diagonals plus left and right.
    Hex6B,
}

impl Topology {
    pub const ALL: [Topology; 5] = [
        Topology::Orthogonal4,
        Topology::Hex6A,
        Topology::Moore8,
        Topology::Diagonal4,
        Topology::Hex6B,
    ];

    /// Look up a topology by its numeric id (1..=5).
    pub fn from_id(id: u32) -> Option<Self> {
        match id {
            1 => Some(Topology::Orthogonal4),
            2 => Some(Topology::Hex6A),
            3 => Some(Topology::Moore8),
            4 => Some(Topology::Diagonal4),
            5 => Some(Topology::Hex6B),
            _ => None,
        }
    }

    pub fn id(self) -> u32 {
        match self {
            Topology::Orthogonal4 => 1,
            Topology::Hex6A => 2,
            Topology::Moore8 => 3,
            Topology::Diagonal4 => 4,
            Topology::Hex6B => 5,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Topology::Orthogonal4 => "orthogonal-4",
            Topology::Hex6A => "hex-6a",
            Topology::Moore8 => "Moore-8",
            Topology::Diagonal4 => "diagonal-4",
            Topology::Hex6B => "hex-6b",
        }
    }

    pub fn offsets(self) -> &'static [Offset] {
        match self {
            Topology::Orthogonal4 => &ORTHOGONAL_4,
            Topology::Hex6A => &HEX_6A,
            Topology::Moore8 => &MOORE_8,
            Topology::Diagonal4 => &DIAGONAL_4,
            Topology::Hex6B => &HEX_6B,
        }
    }
}

impl Default for Topology {
    fn default() -> Self {
        Topology::Moore8
    }
}

impl fmt::Display for Topology {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.id(), self.name())
    }
}

/// Offsets for a raw topology id.
///
/// Unknown ids map to an empty set, so every neighbor count under them is 0.
/// Callers that want rejection instead go through [`Topology::from_id`].
pub fn offsets_for_id(id: u32) -> &'static [Offset] {
    Topology::from_id(id).map(Topology::offsets).unwrap_or(&[])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_roundtrip() {
        for topology in Topology::ALL {
            assert_eq!(Topology::from_id(topology.id()), Some(topology));
        }
    }

    #[test]
    fn out_of_range_ids_are_unknown() {
        assert_eq!(Topology::from_id(0), None);
        assert_eq!(Topology::from_id(6), None);
        assert!(offsets_for_id(0).is_empty());
        assert!(offsets_for_id(6).is_empty());
        assert!(offsets_for_id(u32::MAX).is_empty());
    }

    #[test]
    fn offset_set_sizes() {
        assert_eq!(Topology::Orthogonal4.offsets().len(), 4);
        assert_eq!(Topology::Hex6A.offsets().len(), 6);
        assert_eq!(Topology::Moore8.offsets().len(), 8);
        assert_eq!(Topology::Diagonal4.offsets().len(), 4);
        assert_eq!(Topology::Hex6B.offsets().len(), 6);
    }

    #[test]
    fn offsets_never_include_center_or_repeat() {
        for topology in Topology::ALL {
            let offsets = topology.offsets();
            assert!(!offsets.contains(&(0, 0)), "{topology} includes the center");
            for (i, a) in offsets.iter().enumerate() {
                assert!(!offsets[i + 1..].contains(a), "{topology} repeats {a:?}");
            }
        }
    }

    #[test]
    fn moore_covers_every_unit_offset() {
        let offsets = Topology::Moore8.offsets();
        for dr in -1..=1 {
            for dc in -1..=1 {
                if (dr, dc) != (0, 0) {
                    assert!(offsets.contains(&(dr, dc)));
                }
            }
        }
    }

    #[test]
    fn default_is_moore() {
        assert_eq!(Topology::default(), Topology::Moore8);
        assert_eq!(Topology::default().id(), 3);
    }

    #[test]
    fn display_shows_id_and_name() {
        assert_eq!(Topology::Hex6B.to_string(), "5 (hex-6b)");
    }
}
