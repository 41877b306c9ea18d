//! Display width of decorated strings.
//!
//! Escape sequences are zero width, tabs advance to the next stop and every
//! other code point takes one cell.

const ESC: u8 = 0x1b;
const BEL: u8 = 0x07;

/// Terminal columns taken by `text` when printed from column 0.
///
/// CSI (`ESC [ ... final`) and OSC (`ESC ] ... BEL` or `ESC ] ... ESC \`) sequences
/// count as zero. An escape cut off by the end of input counts one per remaining byte.
/// A `tab_stop` of 0 makes tabs zero width.
pub fn visible_width(text: &str, tab_stop: usize) -> usize {
    let bytes = text.as_bytes();
    let mut width = 0;
    let mut i = 0;

    while i < bytes.len() {
        let b = bytes[i];

        if b == ESC {
            match escape_len(&bytes[i..]) {
                Some(len) => i += len,
                None => {
                    width += bytes.len() - i;
                    break;
                }
            }
            continue;
        }

        if b == b'\t' {
            if tab_stop > 0 {
                width += tab_stop - (width % tab_stop);
            }
            i += 1;
            continue;
        }

        let len = utf8_len(b);
        if i + len > bytes.len() {
            width += bytes.len() - i;
            break;
        }
        width += 1;
        i += len;
    }
    width
}

/// Length in bytes of the escape sequence at the start of `bytes`.
/// A lone `ESC` followed by anything else is a one-byte sequence.
/// Returns `None` when the sequence is not terminated.
fn escape_len(bytes: &[u8]) -> Option<usize> {
    match bytes.get(1) {
        Some(b'[') => {
            // parameters and intermediates, then a final byte in 0x40..=0x7e
            let end = bytes[2..]
                .iter()
                .position(|&c| (0x40..=0x7e).contains(&c))?;
            Some(2 + end + 1)
        }
        Some(b']') => {
            let mut j = 2;
            while j < bytes.len() {
                match bytes[j] {
                    BEL => return Some(j + 1),
                    ESC if bytes.get(j + 1) == Some(&b'\\') => return Some(j + 2),
                    _ => j += 1,
                }
            }
            None
        }
        Some(_) => Some(2),
        None => None,
    }
}

/// Sequence length announced by a UTF-8 lead byte. Stray continuation bytes count as one.
fn utf8_len(lead: u8) -> usize {
    match lead {
        0xf0..=0xf7 => 4,
        0xe0..=0xef => 3,
        0xc0..=0xdf => 2,
        _ => 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_are_zero_width() {
        assert_eq!(visible_width("\x1b[34mabc\x1b[0m", 8), 3);
        assert_eq!(visible_width("\x1b[38;2;1;2;3mab", 8), 2);
        assert_eq!(
            visible_width("\x1b]8;;file:///tmp/a\x1b\\a\x1b]8;;\x1b\\", 8),
            1
        );
        assert_eq!(visible_width("\x1b]0;title\x07x", 8), 1);
    }

    #[test]
    fn truncated_escape_counts_bytes() {
        assert_eq!(visible_width("ab\x1b[3", 8), 2 + 3);
        assert_eq!(visible_width("\x1b", 8), 1);
    }

    #[test]
    fn tabs_expand_to_stops() {
        assert_eq!(visible_width("\t", 8), 8);
        assert_eq!(visible_width("abc\t", 8), 8);
        assert_eq!(visible_width("abc\tx", 4), 5);
        assert_eq!(visible_width("a\tb", 0), 2);
    }

    #[test]
    fn one_cell_per_code_point() {
        assert_eq!(visible_width("héllo", 8), 5);
        assert_eq!(visible_width("日本", 8), 2);
        assert_eq!(visible_width("\u{e7a8} src", 8), 5);
        assert_eq!(visible_width("", 8), 0);
    }
}
