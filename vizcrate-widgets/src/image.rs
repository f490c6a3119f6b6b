//! Image widgets

use tracing::{debug, instrument, warn};
use vizcrate_core::{
    Image, Point3f, PolyData, Rect, Result, Size, TextureImage, Transform3D, Vector3f,
};
use vizcrate_geometry::{reslice, texture_from_image, texture_map_to_plane, PlaneSource};

use crate::prop::{Actor, ImageActor2D, Prop};
use crate::shapes::is_degenerate;

/// An image drawn over the scene inside a pixel rectangle
#[derive(Debug, Clone, PartialEq)]
pub struct ImageOverlayWidget {
    pub(crate) prop: Prop,
}

impl ImageOverlayWidget {
    /// Overlay of `image` resampled to fill `rect`
    #[instrument(level = "debug", skip(image), fields(rows = image.rows(), cols = image.cols()))]
    pub fn new(image: &Image, rect: Rect) -> Result<Self> {
        let texture = texture_from_image(image)?;
        let resampled = reslice(&texture, rect.width as usize, rect.height as usize);
        debug!(width = resampled.width, height = resampled.height, "resliced overlay");
        Ok(Self {
            prop: Prop::Image2D(ImageActor2D {
                image: resampled,
                position: rect.origin(),
                color_window: 255.0,
                color_level: 127.5,
            }),
        })
    }

    /// Show `image` pixel for pixel in place of the current one
    pub fn set_image(&mut self, image: &Image) -> Result<()> {
        let texture = texture_from_image(image)?;
        self.prop.as_image_actor_mut()?.image = texture;
        Ok(())
    }

    pub fn image(&self) -> Result<&TextureImage> {
        Ok(&self.prop.as_image_actor()?.image)
    }
}

/// An image on a rectangle in the scene
#[derive(Debug, Clone, PartialEq)]
pub struct Image3DWidget {
    pub(crate) prop: Prop,
}

impl Image3DWidget {
    /// Quad spanning `[0, width] x [0, height]` in the z = 0 plane
    #[instrument(level = "debug", skip(image))]
    pub fn new(image: &Image, size: Size) -> Result<Self> {
        let texture = texture_from_image(image)?;
        let (w, h) = (size.width as f32, size.height as f32);

        let mut plane = PlaneSource::new();
        plane.set_center(Point3f::new(w / 2.0, h / 2.0, 0.0));
        let scale = Transform3D::scaling_about(&plane.center(), Vector3f::new(w, h, 1.0));
        let quad = plane.output().transformed(&scale);
        let geometry = texture_map_to_plane(
            &quad,
            scale.transform_point(&plane.origin()),
            scale.transform_point(&plane.point1()),
            scale.transform_point(&plane.point2()),
        );
        Ok(Self::textured(geometry, texture))
    }

    /// Quad of `size` centered at `position`, facing along `normal`, with
    /// the image's up direction as close to `up` as possible
    #[instrument(level = "debug", skip(image))]
    pub fn with_pose(
        position: Point3f,
        normal: Vector3f,
        up: Vector3f,
        image: &Image,
        size: Size,
    ) -> Result<Self> {
        if is_degenerate(&normal) {
            warn!("image plane normal has zero length");
        }
        let texture = texture_from_image(image)?;
        let plane = PlaneSource::new();
        let quad =
            texture_map_to_plane(&plane.output(), plane.origin(), plane.point1(), plane.point2());

        let pose = Transform3D::from_forward_up(position.coords, normal, up).compose(
            Transform3D::scaling(Vector3f::new(size.width as f32, size.height as f32, 1.0)),
        );
        Ok(Self::textured(quad.transformed(&pose), texture))
    }

    fn textured(geometry: PolyData, texture: TextureImage) -> Self {
        let mut actor = Actor::new(geometry);
        actor.texture = Some(texture);
        Self {
            prop: Prop::Actor(actor),
        }
    }

    /// Replace the texture, keeping the quad
    pub fn set_image(&mut self, image: &Image) -> Result<()> {
        let texture = texture_from_image(image)?;
        self.prop.as_actor_mut()?.texture = Some(texture);
        Ok(())
    }

    pub fn texture(&self) -> Result<Option<&TextureImage>> {
        Ok(self.prop.as_actor()?.texture.as_ref())
    }
}
