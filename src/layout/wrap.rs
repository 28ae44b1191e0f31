/// The measured size of a run of text, in pixels
#[derive(Debug, Default, Copy, Clone, PartialEq)]
pub struct Extent {
    pub width: f32,
    pub height: f32,
}

impl Extent {
    pub fn new(width: f32, height: f32) -> Extent {
        Extent { width, height }
    }
}

/// A single line of output from [wrap]. Blank lines have empty `text` and still
/// occupy `height` vertically.
#[derive(Debug, Clone, PartialEq)]
pub struct WrappedLine {
    pub text: String,
    pub height: f32,
}

impl WrappedLine {
    pub fn is_blank(&self) -> bool {
        self.text.is_empty()
    }
}

/// Greedily wraps `text` so that every line's measured width stays within `max_width`.
///
/// The text is first split on explicit line breaks, then each line is split into
/// whitespace-delimited words. Words are appended to the current line (separated by a
/// single space) for as long as `measure` reports the result as no wider than
/// `max_width`; the first word that doesn't fit closes the line and starts the next one.
/// A word that is wider than `max_width` on its own is still placed, alone, on its own
/// line: there is nothing better to do with it.
///
/// Lines which are empty or contain only whitespace become a blank [WrappedLine] of
/// `blank_height`, and are never passed to `measure`.
///
/// The output depends only on the inputs, so calling this twice with the same text,
/// width and measurer yields identical line breaks. Both sizing and drawing go through
/// this function for that reason.
pub fn wrap<M>(text: &str, max_width: f32, blank_height: f32, mut measure: M) -> Vec<WrappedLine>
where
    M: FnMut(&str) -> Extent,
{
    let mut lines: Vec<WrappedLine> = Vec::new();

    for line in text.lines() {
        if line.trim().is_empty() {
            lines.push(WrappedLine {
                text: String::new(),
                height: blank_height,
            });
            continue;
        }

        let mut current = String::new();
        let mut current_height = 0.0;
        for word in line.split_whitespace() {
            if current.is_empty() {
                current.push_str(word);
                current_height = measure(&current).height;
                continue;
            }

            let candidate = format!("{current} {word}");
            let extent = measure(&candidate);
            if extent.width <= max_width {
                current = candidate;
                current_height = extent.height;
            } else {
                lines.push(WrappedLine {
                    text: std::mem::take(&mut current),
                    height: current_height,
                });
                current.push_str(word);
                current_height = measure(&current).height;
            }
        }

        lines.push(WrappedLine {
            text: current,
            height: current_height,
        });
    }

    lines
}

/// Sum of the heights of all wrapped lines
pub fn total_height(lines: &[WrappedLine]) -> f32 {
    lines.iter().map(|line| line.height).sum()
}
