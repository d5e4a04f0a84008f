//! Rendering statistics.

use alloc::{format, string::String};
use core::fmt::{self, Display, Formatter};
use core::ops::AddAssign;

/// Collects and accumulates rendering statistics.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct Stats {
    /// Number of frames started.
    pub frames: usize,
    /// Triangles submitted to and rasterized by the rasterizer.
    pub tris: Throughput,
    /// Fragments covered by triangles, and fragments written.
    pub frags: Throughput,
    /// Number of degenerate triangles skipped.
    pub degenerate: usize,
}

/// Count of items input and output by a stage.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct Throughput {
    /// Count of items submitted.
    pub i: usize,
    /// Count of items output.
    pub o: usize,
}

impl Stats {
    /// Creates a new zeroed `Stats` instance.
    pub fn new() -> Self {
        Self::default()
    }
}

impl Display for Stats {
    /// Writes a one-line summary of `self`, like
    /// ```text
    /// frames     1 │ tris    12 /     6 │ frags  1.2k /   980 │ degenerate     0
    /// ```
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let Self { frames, tris, frags, degenerate } = self;
        write!(
            f,
            "frames {} │ tris {tris} │ frags {frags} │ degenerate {}",
            human_num(*frames),
            human_num(*degenerate)
        )
    }
}

impl Display for Throughput {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let &Self { i, o } = self;
        if f.alternate() {
            if i == 0 {
                write!(f, "{:>6}", "--")
            } else {
                let pct = 100.0 * o as f64 / i as f64;
                write!(f, "{pct:>5.1}%")
            }
        } else {
            write!(f, "{} / {}", human_num(i), human_num(o))
        }
    }
}

impl AddAssign for Stats {
    /// Appends the stats of `other` to `self`.
    fn add_assign(&mut self, other: Self) {
        self.frames += other.frames;
        self.tris += other.tris;
        self.frags += other.frags;
        self.degenerate += other.degenerate;
    }
}

impl AddAssign for Throughput {
    fn add_assign(&mut self, rhs: Self) {
        self.i += rhs.i;
        self.o += rhs.o;
    }
}

/// Formats `n` five characters wide, with a `k` or `M` suffix for
/// thousands and millions. One decimal is shown below 100 units of the
/// suffix. Billions and up are written in scientific notation.
fn human_num(n: usize) -> String {
    const SUFFIXES: [(usize, char); 2] = [(1_000_000, 'M'), (1_000, 'k')];

    if n >= 1_000_000_000 {
        return format!("{:5.1e}", n as f64);
    }
    match SUFFIXES.into_iter().find(|&(unit, _)| n >= unit) {
        None => format!("{n:5}"),
        Some((unit, sfx)) if n < 100 * unit => {
            format!("{:4.1}{sfx}", n as f64 / unit as f64)
        }
        Some((unit, sfx)) => format!("{:4}{sfx}", n / unit),
    }
}

#[cfg(test)]
mod tests {
    use alloc::format;

    use super::*;

    #[test]
    fn stats_display() {
        let stats = Stats {
            frames: 3,
            tris: Throughput { i: 36, o: 18 },
            frags: Throughput { i: 12345, o: 6789 },
            degenerate: 2,
        };
        assert_eq!(
            format!("{stats}"),
            "frames     3 │ tris    36 /    18 │ frags 12.3k /  6.8k │ degenerate     2"
        );
    }

    #[test]
    fn throughput_percentage() {
        assert_eq!(format!("{:#}", Throughput { i: 200, o: 50 }), " 25.0%");
        assert_eq!(format!("{:#}", Throughput::default()), "    --");
    }

    #[test]
    fn stats_add_assign() {
        let mut s = Stats::new();
        s += Stats {
            frames: 1,
            tris: Throughput { i: 2, o: 1 },
            frags: Throughput { i: 10, o: 5 },
            degenerate: 1,
        };
        s += Stats { frames: 1, ..Stats::default() };
        assert_eq!(s.frames, 2);
        assert_eq!(s.tris, Throughput { i: 2, o: 1 });
        assert_eq!(s.degenerate, 1);
    }

    #[test]
    fn human_nums() {
        assert_eq!(human_num(10), "   10");
        assert_eq!(human_num(1_234), " 1.2k");
        assert_eq!(human_num(123_456), " 123k");
        assert_eq!(human_num(1_234_567), " 1.2M");
        assert_eq!(human_num(123_456_789), " 123M");
        assert_eq!(human_num(1_234_567_890), "1.2e9");
        assert_eq!(human_num(999), "  999");
        assert_eq!(human_num(1_000), " 1.0k");
        assert_eq!(human_num(100_000), " 100k");
        assert_eq!(human_num(999_999), " 999k");
        assert_eq!(human_num(1_000_000), " 1.0M");
    }
}
