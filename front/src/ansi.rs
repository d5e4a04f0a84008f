//! Output of color buffers to a terminal using ANSI escape sequences.
//!
//! Each text cell shows two vertically adjacent pixels: the upper one as
//! the foreground color of an upper half block `▀`, and the lower one as
//! the background color. The terminal must support 24-bit color.

use std::fmt::{self, Display, Formatter};
use std::io::{self, BufWriter, Write};

use mathy_core::math::Color3;
use mathy_core::util::buf::Buf2;

/// Upper half block character.
const HALF_BLOCK: char = '▀';

/// An ANSI control sequence.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Ansi {
    /// Moves the cursor to the top left corner of the terminal.
    CursorHome,
    /// Resets all graphic attributes.
    Reset,
    /// Sets the foreground color.
    Fg([u8; 3]),
    /// Sets the background color.
    Bg([u8; 3]),
}

impl Display for Ansi {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        use Ansi::*;
        match self {
            CursorHome => write!(f, "\x1B[H"),
            Reset => write!(f, "\x1B[0m"),
            Fg([r, g, b]) => write!(f, "\x1B[38;2;{r};{g};{b}m"),
            Bg([r, g, b]) => write!(f, "\x1B[48;2;{r};{g};{b}m"),
        }
    }
}

/// Writes `buf` to `out`, two pixel rows per line of text.
///
/// If the height of `buf` is odd, the last line only has a foreground
/// color. Every line ends with an attribute reset.
pub fn write_buf<W: Write>(out: &mut W, buf: &Buf2<Color3>) -> io::Result<()> {
    let mut rows = buf.rows();
    while let Some(upper) = rows.next() {
        match rows.next() {
            Some(lower) => {
                for (u, l) in upper.iter().zip(lower) {
                    let (fg, bg) = (Ansi::Fg(u.to_u8()), Ansi::Bg(l.to_u8()));
                    write!(out, "{fg}{bg}{HALF_BLOCK}")?;
                }
            }
            None => {
                for u in upper {
                    write!(out, "{}{HALF_BLOCK}", Ansi::Fg(u.to_u8()))?;
                }
            }
        }
        writeln!(out, "{}", Ansi::Reset)?;
    }
    out.flush()
}

/// Prints `buf` to the standard output, starting at the top left corner
/// of the terminal.
pub fn print(buf: &Buf2<Color3>) -> io::Result<()> {
    let mut out = BufWriter::new(io::stdout().lock());
    write!(out, "{}", Ansi::CursorHome)?;
    write_buf(&mut out, buf)
}

#[cfg(test)]
mod tests {
    use mathy_core::math::rgb;

    use super::*;

    #[test]
    fn sequences() {
        assert_eq!(Ansi::Reset.to_string(), "\x1B[0m");
        assert_eq!(Ansi::CursorHome.to_string(), "\x1B[H");
        assert_eq!(Ansi::Fg([1, 2, 3]).to_string(), "\x1B[38;2;1;2;3m");
        assert_eq!(Ansi::Bg([255, 0, 0]).to_string(), "\x1B[48;2;255;0;0m");
    }

    #[test]
    fn two_rows_per_line() {
        let buf = Buf2::new_with(2, 2, |x, y| {
            rgb(100.0 * x as f64, 100.0 * y as f64, 0.0)
        });
        let mut out = Vec::new();
        write_buf(&mut out, &buf).unwrap();

        let s = String::from_utf8(out).unwrap();
        assert_eq!(
            s,
            "\x1B[38;2;0;0;0m\x1B[48;2;0;100;0m▀\
             \x1B[38;2;100;0;0m\x1B[48;2;100;100;0m▀\
             \x1B[0m\n"
        );
    }

    #[test]
    fn odd_height_has_no_background_on_last_line() {
        let buf = Buf2::new_filled(1, 3, rgb(255.0, 255.0, 255.0));
        let mut out = Vec::new();
        write_buf(&mut out, &buf).unwrap();

        let s = String::from_utf8(out).unwrap();
        let lines: Vec<_> = s.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[1], "\x1B[38;2;255;255;255m▀\x1B[0m");
    }
}
