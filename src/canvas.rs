use egui::{Color32, ColorImage, Context, Painter, Pos2, Rect, Response, TextureHandle, TextureOptions, Vec2};

use crate::editor::LiveImage;

/// Displays the live image and lets the user drag it around.
///
/// The texture is only re-uploaded when the live image's revision changes.
/// Images larger than the GPU texture limit are uploaded downscaled but
/// still painted at their full size.
pub struct CanvasView {
    texture: Option<TextureHandle>,
    /// Size of the live image in pixels, independent of the texture size
    image_size: Vec2,
    /// Revision of the live image the texture was built from
    revision: u64,
    /// Top-left corner of the image relative to the canvas
    offset: Vec2,
    dragging: bool,
}

impl CanvasView {
    pub fn new(origin: [f32; 2]) -> Self {
        Self {
            texture: None,
            image_size: Vec2::ZERO,
            revision: 0,
            offset: Vec2::new(origin[0], origin[1]),
            dragging: false,
        }
    }

    /// Rebuilds the texture if the live image changed since the last frame.
    /// Returns true if the texture was replaced.
    pub fn sync(&mut self, ctx: &Context, live: &LiveImage) -> bool {
        if live.revision() == self.revision {
            return false;
        }
        self.revision = live.revision();

        let max_side = ctx.input(|i| i.max_texture_side) as u32;
        self.texture = live.image().map(|image| {
            self.image_size = Vec2::new(image.width() as f32, image.height() as f32);
            let rgba = if image.width() > max_side || image.height() > max_side {
                log::debug!(
                    "Downscaling {}x{} canvas texture to fit {}",
                    image.width(),
                    image.height(),
                    max_side
                );
                image.thumbnail(max_side, max_side).to_rgba8()
            } else {
                image.to_rgba8()
            };
            let size = [rgba.width() as usize, rgba.height() as usize];
            let color_image = ColorImage::from_rgba_unmultiplied(size, rgba.as_raw());
            log::debug!("Uploading canvas texture r{} ({}x{})", self.revision, size[0], size[1]);
            ctx.load_texture("canvas_image", color_image, TextureOptions::LINEAR)
        });
        true
    }

    /// Screen rect of the image inside `canvas`
    pub fn image_rect(&self, canvas: Rect) -> Option<Rect> {
        self.texture
            .as_ref()
            .map(|_| Rect::from_min_size(canvas.min + self.offset, self.image_size))
    }

    /// Moves the image while a drag that started on it is in progress
    pub fn handle_drag(&mut self, response: &Response) {
        if response.drag_started() {
            self.dragging = match (response.interact_pointer_pos(), self.image_rect(response.rect)) {
                (Some(pointer), Some(image_rect)) => image_rect.contains(pointer),
                _ => false,
            };
        }

        if self.dragging && response.dragged() {
            self.offset += response.drag_delta();
        }

        if response.drag_stopped() {
            self.dragging = false;
        }
    }

    pub fn paint(&self, painter: &Painter, canvas: Rect) {
        if let (Some(texture), Some(rect)) = (&self.texture, self.image_rect(canvas)) {
            let uv = Rect::from_min_max(Pos2::ZERO, Pos2::new(1.0, 1.0));
            painter.image(texture.id(), rect, uv, Color32::WHITE);
        }
    }

    pub fn offset(&self) -> Vec2 {
        self.offset
    }
}
