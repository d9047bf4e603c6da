// crates/engine_platform/src/input/text.rs

use crate::error::InputError;

/// Rebuilds codepoints from UTF-16 units that arrive one message at a time.
#[derive(Debug, Default, Clone)]
pub struct SurrogateAssembler {
    pending_high: Option<u16>,
}

/// Result of feeding one unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Assembled {
    /// A complete printable character, if this unit finished one.
    pub text: Option<char>,
    /// A problem with this unit or with a stale high surrogate before it.
    pub error: Option<InputError>,
}

fn is_high(unit: u16) -> bool {
    (0xD800..=0xDBFF).contains(&unit)
}

fn is_low(unit: u16) -> bool {
    (0xDC00..=0xDFFF).contains(&unit)
}

/// Control characters are dropped; only these become text events.
pub fn is_printable(c: char) -> bool {
    let cp = u32::from(c);
    cp >= 32 && cp != 127
}

impl SurrogateAssembler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_pending(&self) -> bool {
        self.pending_high.is_some()
    }

    pub fn push(&mut self, unit: u16) -> Assembled {
        let mut out = Assembled::default();

        if let Some(high) = self.pending_high.take() {
            if is_low(unit) {
                let cp = 0x10000 + ((u32::from(high) - 0xD800) << 10) + (u32::from(unit) - 0xDC00);
                out.text = char::from_u32(cp).filter(|c| is_printable(*c));
                return out;
            }
            // The stale high is reported; `unit` is still handled below.
            out.error = Some(InputError::UnpairedHighSurrogate(high));
        }

        if is_high(unit) {
            self.pending_high = Some(unit);
        } else if is_low(unit) {
            out.error = Some(InputError::UnpairedLowSurrogate(unit));
        } else {
            out.text = char::from_u32(u32::from(unit)).filter(|c| is_printable(*c));
        }
        out
    }
}
