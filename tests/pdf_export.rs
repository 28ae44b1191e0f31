use image::{DynamicImage, Rgba, RgbaImage};
use recipe_card::{write_card_pdf, Document, Image, Info, Page, Pt};

fn contains(haystack: &[u8], needle: &str) -> bool {
    haystack
        .windows(needle.len())
        .any(|window| window == needle.as_bytes())
}

fn occurrences(haystack: &[u8], needle: &str) -> usize {
    haystack
        .windows(needle.len())
        .filter(|window| *window == needle.as_bytes())
        .count()
}

fn card(width: u32, height: u32, alpha: u8) -> RgbaImage {
    RgbaImage::from_pixel(width, height, Rgba([250, 240, 220, alpha]))
}

#[test]
fn card_pdf_is_a_single_page_at_the_card_resolution() {
    let mut bytes = Vec::new();
    write_card_pdf(card(1700, 2200, 255), None, 200.0, &mut bytes).unwrap();

    assert!(bytes.starts_with(b"%PDF-"));
    assert!(contains(&bytes, "/Count 1"));
    assert!(contains(&bytes, "/MediaBox [0 0 612 792]"));
    assert!(contains(&bytes, "/Subtype /Image"));
    assert!(contains(&bytes, "/FlateDecode"));
    assert!(contains(&bytes, "/Title (Recipe)"));
    assert!(!contains(&bytes, "/SMask"));
}

#[test]
fn illustration_goes_on_a_second_page() {
    let picture = Image::new_raster(DynamicImage::ImageRgba8(card(400, 400, 128)));
    let mut bytes = Vec::new();
    write_card_pdf(card(200, 100, 255), Some(picture), 100.0, &mut bytes).unwrap();

    assert!(contains(&bytes, "/Count 2"));
    assert!(contains(&bytes, "/MediaBox [0 0 144 72]"));
    assert!(contains(&bytes, "/MediaBox [0 0 288 288]"));
    // only the translucent illustration needs a mask
    assert!(contains(&bytes, "/SMask"));
    assert!(contains(&bytes, "/I0 Do"));
    assert!(contains(&bytes, "/I1 Do"));
    // each image is named once in its own page's resources and once where it's drawn
    assert_eq!(occurrences(&bytes, "/I0 "), 2);
    assert_eq!(occurrences(&bytes, "/I1 "), 2);
}

#[test]
fn documents_compose_pages_and_metadata() {
    let mut doc = Document::default();
    let mut info = Info::new();
    info.title("Weeknight Dal")
        .author("Test Kitchen")
        .keywords("lentils, vegan");
    doc.set_info(info);

    let image = doc.add_image(Image::new_raster(DynamicImage::ImageRgb8(
        DynamicImage::ImageRgba8(card(72, 72, 255)).to_rgb8(),
    )));
    let page = Page::for_image(image, &doc.images[image], 72.0);
    doc.add_page(page);
    doc.add_page(Page::new((Pt(100.0), Pt(50.0))));

    let mut bytes = Vec::new();
    doc.write(&mut bytes).unwrap();

    assert!(contains(&bytes, "/Count 2"));
    assert!(contains(&bytes, "/MediaBox [0 0 72 72]"));
    assert!(contains(&bytes, "/MediaBox [0 0 100 50]"));
    assert!(contains(&bytes, "/Author (Test Kitchen)"));
    assert!(contains(&bytes, "/Keywords (lentils, vegan)"));
    assert!(contains(&bytes, "/Creator (recipe-card v"));
}
