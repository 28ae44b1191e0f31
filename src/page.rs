use crate::image::Image;
use crate::rect::Rect;
use crate::refs::{ObjectReferences, RefType};
use crate::units::Pt;
use crate::Error;
use id_arena::{Arena, Id};
use pdf_writer::{Finish, Name, Pdf};
use std::io::Write;

/// An image drawn on a page, stretched to fill `position`
#[derive(Clone, PartialEq, Debug)]
pub struct ImageLayout {
    pub image_id: Id<Image>,
    pub position: Rect,
}

pub struct Page {
    /// The size of the page
    pub media_box: Rect,
    /// The placed images, painted in order
    pub contents: Vec<ImageLayout>,
}

impl Page {
    /// Create a new, empty page of the given (width, height)
    pub fn new(size: (Pt, Pt)) -> Page {
        Page {
            media_box: Rect::sized(size.0, size.1),
            contents: Vec::default(),
        }
    }

    /// Create a page exactly the size of `image` when printed at `dpi`, with the image
    /// covering the whole page
    pub fn for_image(image_id: Id<Image>, image: &Image, dpi: f32) -> Page {
        let size = (Pt::from_px(image.width, dpi), Pt::from_px(image.height, dpi));
        let mut page = Page::new(size);
        page.add_image(ImageLayout {
            image_id,
            position: page.media_box,
        });
        page
    }

    pub fn add_image(&mut self, image: ImageLayout) {
        self.contents.push(image);
    }

    /// Each image placed on the page, once, in the order first placed
    pub fn image_ids(&self) -> Vec<Id<Image>> {
        let mut ids: Vec<Id<Image>> = Vec::new();
        for layout in self.contents.iter() {
            if !ids.contains(&layout.image_id) {
                ids.push(layout.image_id);
            }
        }
        ids
    }

    #[allow(clippy::write_with_newline)]
    fn render(&self) -> Result<Vec<u8>, std::io::Error> {
        let mut content: Vec<u8> = Vec::default();

        for image in self.contents.iter() {
            write!(&mut content, "q\n")?;
            write!(
                &mut content,
                "{} 0 0 {} {} {} cm\n",
                image.position.width().0,
                image.position.height().0,
                image.position.x1.0,
                image.position.y1.0
            )?;
            write!(&mut content, "/I{} Do\n", image.image_id.index())?;
            write!(&mut content, "Q\n")?;
        }

        Ok(content)
    }

    pub(crate) fn write(
        &self,
        refs: &mut ObjectReferences,
        page_index: usize,
        images: &Arena<Image>,
        writer: &mut Pdf,
    ) -> Result<(), Error> {
        let id = refs
            .get(RefType::Page(page_index))
            .ok_or(Error::PageMissing)?;
        let parent = refs.get(RefType::PageTree).ok_or(Error::PageMissing)?;
        let content_id = refs.gen(RefType::ContentForPage(page_index));

        let mut page = writer.page(id);
        page.media_box(self.media_box.into());
        page.parent(parent);

        let mut resources = page.resources();
        let mut resource_xobjects = resources.x_objects();
        for image_id in self.image_ids() {
            images
                .get(image_id)
                .ok_or(Error::ImageMissing(image_id.index()))?;
            let image_ref = refs
                .get(RefType::Image(image_id.index()))
                .ok_or(Error::ImageMissing(image_id.index()))?;
            resource_xobjects.pair(Name(format!("I{}", image_id.index()).as_bytes()), image_ref);
        }
        resource_xobjects.finish();
        resources.finish();

        page.contents(content_id);
        page.finish();

        let rendered = self.render()?;
        writer.stream(content_id, rendered.as_slice());

        Ok(())
    }
}
