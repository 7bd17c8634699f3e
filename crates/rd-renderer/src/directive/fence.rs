//! Fenced code block tracking.
//!
//! Directive syntax inside fenced code blocks is literal text, so the processor
//! feeds every line through a [`FenceTracker`] and skips lines inside a fence.

/// Opening fence: marker character and run length.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Fence {
    marker: char,
    len: usize,
}

/// Tracks code fence state during line-by-line processing.
///
/// Fences use three or more backticks or tildes. A closing fence uses the
/// same marker, is at least as long as the opening one, and carries no info
/// string.
#[derive(Debug, Default)]
pub(crate) struct FenceTracker {
    open: Option<Fence>,
}

impl FenceTracker {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Check if currently inside a fenced code block.
    pub(crate) fn in_fence(&self) -> bool {
        self.open.is_some()
    }

    /// Feed the next line. Returns `true` if the line opens or closes a fence.
    pub(crate) fn update(&mut self, line: &str) -> bool {
        let Some(fence) = leading_fence(line.trim_start()) else {
            return false;
        };

        match self.open {
            Some(open) => {
                let rest = &line.trim_start()[fence.len * fence.marker.len_utf8()..];
                if fence.marker == open.marker
                    && fence.len >= open.len
                    && rest.trim().is_empty()
                {
                    self.open = None;
                    true
                } else {
                    false
                }
            }
            None => {
                self.open = Some(fence);
                true
            }
        }
    }
}

/// Marker run at the start of a line, if it is long enough to be a fence.
fn leading_fence(trimmed: &str) -> Option<Fence> {
    let marker = trimmed.chars().next().filter(|&c| c == '`' || c == '~')?;
    let len = trimmed.chars().take_while(|&c| c == marker).count();
    (len >= 3).then_some(Fence { marker, len })
}
