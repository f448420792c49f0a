//! GenBank-style labels for locations
//!
//! Coordinates print 1-based. `<` and `>` mark partial low and high ends,
//! minus-strand elements are wrapped in `complement(...)`, and multi-part
//! locations print as `join(...)` (`order(...)` for packed points).

use super::{Interval, Location, Point, SeqId, Strand};
use std::fmt;

fn write_oriented(
    f: &mut fmt::Formatter<'_>,
    strand: Strand,
    body: impl FnOnce(&mut fmt::Formatter<'_>) -> fmt::Result,
) -> fmt::Result {
    if strand.is_minus() {
        write!(f, "complement(")?;
        body(f)?;
        write!(f, ")")
    } else {
        body(f)
    }
}

/// 1-based label for a 0-based coordinate, exact up to `u64::MAX`
fn one_based(pos: u64) -> u128 {
    u128::from(pos) + 1
}

fn write_point(f: &mut fmt::Formatter<'_>, id: &SeqId, position: u64, strand: Strand) -> fmt::Result {
    write_oriented(f, strand, |f| write!(f, "{}:{}", id, one_based(position)))
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_oriented(f, self.strand, |f| {
            write!(f, "{}:", self.id)?;
            if self.partial_low() {
                write!(f, "<")?;
            }
            write!(f, "{}", one_based(self.from))?;
            if self.from != self.to || self.partial_high() {
                write!(f, "..")?;
                if self.partial_high() {
                    write!(f, ">")?;
                }
                write!(f, "{}", one_based(self.to))?;
            }
            Ok(())
        })
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_point(f, &self.id, self.position, self.strand)
    }
}

fn write_list<T: fmt::Display>(f: &mut fmt::Formatter<'_>, op: &str, items: &[T]) -> fmt::Result {
    write!(f, "{}(", op)?;
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            write!(f, ",")?;
        }
        write!(f, "{}", item)?;
    }
    write!(f, ")")
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Location::Point(p) => write!(f, "{}", p),
            Location::Interval(iv) => write!(f, "{}", iv),
            Location::PackedPoints(pp) => {
                write!(f, "order(")?;
                for (i, pos) in pp.points.iter().enumerate() {
                    if i > 0 {
                        write!(f, ",")?;
                    }
                    write_point(f, &pp.id, *pos, pp.strand)?;
                }
                write!(f, ")")
            }
            Location::PackedIntervals(ivs) => write_list(f, "join", ivs),
            Location::Mix(parts) => write_list(f, "join", parts),
        }
    }
}
