use recipe_card::layout::{
    total_height, AutoFit, CanvasBackend, Extent, FitError, FontBackend, FontSize, Geometry,
};
use recipe_card::Colour;
use std::cell::RefCell;

/// Monospaced fake: every character is half an em wide and every line one em tall
#[derive(Default)]
struct HalfEm {
    draws: RefCell<Vec<(String, f32)>>,
}

impl FontBackend for HalfEm {
    type Font = FontSize;

    fn load_font(&self, size: FontSize) -> Result<FontSize, FitError> {
        Ok(size)
    }

    fn measure(&self, text: &str, font: &FontSize) -> Extent {
        let size = *font as f32;
        Extent::new(text.chars().count() as f32 * size / 2.0, size)
    }
}

impl CanvasBackend for HalfEm {
    type Surface = (u32, u32);

    fn blank(&self, width: u32, height: u32) -> (u32, u32) {
        (width, height)
    }

    fn dimensions(&self, surface: &(u32, u32)) -> (u32, u32) {
        *surface
    }

    fn draw_text(
        &self,
        _surface: &mut (u32, u32),
        origin: (f32, f32),
        text: &str,
        _font: &FontSize,
        _fill: Colour,
    ) {
        self.draws.borrow_mut().push((text.to_string(), origin.1));
    }

    fn composite(&self, _dest: &mut (u32, u32), _src: &(u32, u32), _offset: (u32, u32)) {}
}

fn texts() -> Vec<String> {
    vec![
        "Hello world\nThis is a test".to_string(),
        lipsum::lipsum_words(12),
        lipsum::lipsum(60),
        format!("{}\n\n{}", lipsum::lipsum_words(20), lipsum::lipsum_words(35)),
        "Supercalifragilisticexpialidocious soup".to_string(),
    ]
}

fn fits(autofit: &AutoFit, text: &str, width: u32, height: u32, size: FontSize) -> bool {
    let lines = autofit
        .wrap_at(&HalfEm::default(), text, width as f32, size)
        .unwrap();
    total_height(&lines) <= height as f32
}

#[test]
fn wrapped_height_grows_with_font_size() {
    let autofit = AutoFit::default();
    for text in texts() {
        for width in [40, 150, 400, 1300] {
            let mut previous = 0.0;
            for size in 1..=150 {
                let lines = autofit
                    .wrap_at(&HalfEm::default(), &text, width as f32, size)
                    .unwrap();
                let height = total_height(&lines);
                assert!(
                    height >= previous,
                    "height shrank from {previous} to {height} at size {size}, width {width}"
                );
                previous = height;
            }
        }
    }
}

#[test]
fn chosen_size_is_the_largest_that_fits() {
    let autofit = AutoFit::new(1, 200);
    for text in texts() {
        for (width, height) in [(400, 200), (120, 900), (1300, 1700), (60, 40)] {
            let fit = autofit.fit(&HalfEm::default(), &text, width, height).unwrap();

            assert!(fit.total_height() <= height as f32 || fit.size == autofit.min_font);
            assert_eq!(fit.overflow, fit.total_height() > height as f32);
            if fit.size < autofit.max_font {
                assert!(!fits(&autofit, &text, width, height, fit.size + 1));
            }

            let best = (1..=200)
                .rev()
                .find(|&size| fits(&autofit, &text, width, height, size))
                .unwrap_or(1);
            assert_eq!(fit.size, best);
        }
    }
}

#[test]
fn wrapping_is_deterministic() {
    let autofit = AutoFit::default();
    let text = lipsum::lipsum(120);
    let first = autofit.wrap_at(&HalfEm::default(), &text, 333.0, 17).unwrap();
    let second = autofit.wrap_at(&HalfEm::default(), &text, 333.0, 17).unwrap();
    assert_eq!(first, second);

    let a = autofit.fit(&HalfEm::default(), &text, 500, 700).unwrap();
    let b = autofit.fit(&HalfEm::default(), &text, 500, 700).unwrap();
    assert_eq!(a, b);
}

#[test]
fn blank_lines_take_space_but_draw_nothing() {
    let backend = HalfEm::default();
    let rendered = AutoFit::new(1, 20)
        .render(&backend, "ab\n   \ncd", Geometry::new(200, 200, 0))
        .unwrap();

    let size = rendered.fit.size as f32;
    assert_eq!(rendered.fit.lines.len(), 3);
    assert!(rendered.fit.lines[1].is_blank());
    assert_eq!(rendered.fit.lines[1].height, size);

    let draws = backend.draws.borrow();
    assert_eq!(draws.len(), 2);
    assert_eq!(draws[1], ("cd".to_string(), 2.0 * size));
}

#[test]
fn two_line_greeting_on_a_small_card() {
    let backend = HalfEm::default();
    let geometry = Geometry::new(500, 300, 50);
    let rendered = AutoFit::default()
        .render(&backend, "Hello world\nThis is a test", geometry)
        .unwrap();

    // at 66 "This is a test" has wrapped and three lines take 198 of 200px
    assert_eq!(rendered.fit.size, 66);
    assert!(!rendered.fit.overflow);
    let lines: Vec<&str> = rendered.fit.lines.iter().map(|l| l.text.as_str()).collect();
    assert_eq!(lines, vec!["Hello world", "This is a", "test"]);

    let again = AutoFit::default()
        .render(&HalfEm::default(), "Hello world\nThis is a test", geometry)
        .unwrap();
    assert_eq!(again.fit, rendered.fit);
}

#[test]
fn text_too_long_for_the_card_overflows_at_the_minimum() {
    let backend = HalfEm::default();
    let text = lipsum::lipsum(400);
    let rendered = AutoFit::default()
        .render(&backend, &text, Geometry::new(100, 100, 40))
        .unwrap();

    assert_eq!(rendered.fit.size, 1);
    assert!(rendered.fit.overflow);
    assert!(rendered.fit.total_height() > 20.0);
    // still drawn, running off the bottom
    assert_eq!(backend.draws.borrow().len(), rendered.fit.lines.len());
}

#[test]
fn empty_text_uses_the_largest_size() {
    let backend = HalfEm::default();
    let rendered = AutoFit::default()
        .render(&backend, "", Geometry::new(500, 300, 50))
        .unwrap();

    assert_eq!(rendered.fit.size, 1000);
    assert!(rendered.fit.lines.is_empty());
    assert_eq!(rendered.fit.total_height(), 0.0);
    assert!(!rendered.fit.overflow);
    assert!(backend.draws.borrow().is_empty());
}
