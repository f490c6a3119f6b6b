//! Display objects
//!
//! A [`Prop`] is what a renderer consumes: geometry or an image together with
//! the state needed to draw it. Each widget owns exactly one prop.

use serde::{Deserialize, Serialize};
use vizcrate_core::{
    Bounds, Color, Drawable, Error, Point2i, Point3f, PolyData, Result, TextureImage, Transform3D,
};
use vizcrate_geometry::VectorText;

/// Where an actor takes its colors from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScalarMode {
    /// Single material color from the [`Property`]
    Material,
    /// Per-point colors stored in the geometry
    UsePointData,
}

/// Material state of a 3D prop
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Property {
    /// Red-green-blue in `[0, 1]`
    pub color: [f32; 3],
    pub line_width: f32,
}

impl Default for Property {
    fn default() -> Self {
        Self {
            color: [1.0, 1.0, 1.0],
            line_width: 1.0,
        }
    }
}

/// Geometry with a material, an optional texture and a pose
#[derive(Debug, Clone, PartialEq)]
pub struct Actor {
    pub geometry: PolyData,
    pub property: Property,
    pub scalar_mode: ScalarMode,
    pub texture: Option<TextureImage>,
    pub pose: Transform3D,
}

impl Actor {
    pub fn new(geometry: PolyData) -> Self {
        Self {
            geometry,
            property: Property::default(),
            scalar_mode: ScalarMode::Material,
            texture: None,
            pose: Transform3D::identity(),
        }
    }

    /// Actor colored by the per-point colors of its geometry
    pub fn with_point_colors(geometry: PolyData) -> Self {
        Self {
            scalar_mode: ScalarMode::UsePointData,
            ..Self::new(geometry)
        }
    }
}

impl Drawable for Actor {
    fn bounding_box(&self) -> Option<Bounds> {
        self.geometry.transformed(&self.pose).bounding_box()
    }
}

/// Actor over vector text that the renderer keeps turned toward the camera
#[derive(Debug, Clone, PartialEq)]
pub struct Follower {
    source: VectorText,
    geometry: PolyData,
    pub position: Point3f,
    pub scale: f32,
    pub property: Property,
    pub pose: Transform3D,
}

impl Follower {
    pub fn new(source: VectorText, position: Point3f, scale: f32) -> Self {
        let geometry = source.output();
        Self {
            source,
            geometry,
            position,
            scale,
            property: Property::default(),
            pose: Transform3D::identity(),
        }
    }

    pub fn source(&self) -> &VectorText {
        &self.source
    }

    /// Replace the text and regenerate the glyph geometry
    pub fn set_text(&mut self, text: &str) {
        self.source.set_text(text);
        self.geometry = self.source.output();
    }

    /// Glyph geometry in text units, before placement
    pub fn geometry(&self) -> &PolyData {
        &self.geometry
    }

    /// Placement of the glyphs before camera facing: pose, then position, then scale
    pub fn placement(&self) -> Transform3D {
        self.pose
            .compose(Transform3D::translation(self.position.coords))
            .compose(Transform3D::uniform_scaling(self.scale))
    }
}

impl Drawable for Follower {
    fn bounding_box(&self) -> Option<Bounds> {
        self.geometry.transformed(&self.placement()).bounding_box()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum FontFamily {
    #[default]
    Arial,
    Courier,
    Times,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Justification {
    #[default]
    Left,
    Centered,
    Right,
}

/// Font state of a 2D text prop
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TextProperty {
    pub font_size: u32,
    pub font_family: FontFamily,
    pub justification: Justification,
    pub bold: bool,
    pub italic: bool,
    pub color: [f32; 3],
}

/// Text drawn over the scene at pixel coordinates
#[derive(Debug, Clone, PartialEq)]
pub struct TextActor {
    pub text: String,
    pub position: Point2i,
    pub text_property: TextProperty,
}

/// Image drawn over the scene at pixel coordinates
#[derive(Debug, Clone, PartialEq)]
pub struct ImageActor2D {
    pub image: TextureImage,
    pub position: Point2i,
    pub color_window: f32,
    pub color_level: f32,
}

/// The display object behind a widget
#[derive(Debug, Clone, PartialEq)]
pub enum Prop {
    Actor(Actor),
    Follower(Follower),
    Text(TextActor),
    Image2D(ImageActor2D),
}

impl Prop {
    pub fn type_name(&self) -> &'static str {
        match self {
            Prop::Actor(_) => "Actor",
            Prop::Follower(_) => "Follower",
            Prop::Text(_) => "TextActor",
            Prop::Image2D(_) => "ImageActor2D",
        }
    }

    fn mismatch(&self, expected: &'static str) -> Error {
        Error::PropMismatch {
            expected,
            found: self.type_name(),
        }
    }

    pub fn as_actor(&self) -> Result<&Actor> {
        match self {
            Prop::Actor(actor) => Ok(actor),
            other => Err(other.mismatch("Actor")),
        }
    }

    pub fn as_actor_mut(&mut self) -> Result<&mut Actor> {
        match self {
            Prop::Actor(actor) => Ok(actor),
            other => Err(other.mismatch("Actor")),
        }
    }

    pub fn as_follower(&self) -> Result<&Follower> {
        match self {
            Prop::Follower(follower) => Ok(follower),
            other => Err(other.mismatch("Follower")),
        }
    }

    pub fn as_follower_mut(&mut self) -> Result<&mut Follower> {
        match self {
            Prop::Follower(follower) => Ok(follower),
            other => Err(other.mismatch("Follower")),
        }
    }

    pub fn as_text_actor(&self) -> Result<&TextActor> {
        match self {
            Prop::Text(text) => Ok(text),
            other => Err(other.mismatch("TextActor")),
        }
    }

    pub fn as_text_actor_mut(&mut self) -> Result<&mut TextActor> {
        match self {
            Prop::Text(text) => Ok(text),
            other => Err(other.mismatch("TextActor")),
        }
    }

    pub fn as_image_actor(&self) -> Result<&ImageActor2D> {
        match self {
            Prop::Image2D(image) => Ok(image),
            other => Err(other.mismatch("ImageActor2D")),
        }
    }

    pub fn as_image_actor_mut(&mut self) -> Result<&mut ImageActor2D> {
        match self {
            Prop::Image2D(image) => Ok(image),
            other => Err(other.mismatch("ImageActor2D")),
        }
    }

    /// Whether the prop lives in world space (as opposed to screen overlays)
    pub fn is_3d(&self) -> bool {
        matches!(self, Prop::Actor(_) | Prop::Follower(_))
    }

    /// World-space bounds of 3D props, `None` for overlays and empty geometry
    pub fn bounds(&self) -> Option<Bounds> {
        match self {
            Prop::Actor(actor) => actor.bounding_box(),
            Prop::Follower(follower) => follower.bounding_box(),
            Prop::Text(_) | Prop::Image2D(_) => None,
        }
    }

    /// Geometry of a 3D prop with its placement applied
    pub fn world_geometry(&self) -> Option<PolyData> {
        match self {
            Prop::Actor(actor) => Some(actor.geometry.transformed(&actor.pose)),
            Prop::Follower(follower) => Some(follower.geometry.transformed(&follower.placement())),
            Prop::Text(_) | Prop::Image2D(_) => None,
        }
    }

    /// Material color of the prop
    pub fn color(&self) -> Result<Color> {
        match self {
            Prop::Actor(actor) => Ok(Color::from_rgb_f32(actor.property.color)),
            Prop::Follower(follower) => Ok(Color::from_rgb_f32(follower.property.color)),
            Prop::Text(text) => Ok(Color::from_rgb_f32(text.text_property.color)),
            Prop::Image2D(_) => Err(Error::Unsupported("image overlays have no color".into())),
        }
    }

    /// Set the material color. Actors switch from per-point colors to the
    /// material color.
    pub fn set_color(&mut self, color: Color) -> Result<()> {
        let rgb = color.to_rgb_f32();
        match self {
            Prop::Actor(actor) => {
                actor.property.color = rgb;
                actor.scalar_mode = ScalarMode::Material;
            }
            Prop::Follower(follower) => follower.property.color = rgb,
            Prop::Text(text) => text.text_property.color = rgb,
            Prop::Image2D(_) => {
                return Err(Error::Unsupported("image overlays have no color".into()))
            }
        }
        Ok(())
    }

    pub fn pose(&self) -> Result<Transform3D> {
        match self {
            Prop::Actor(actor) => Ok(actor.pose),
            Prop::Follower(follower) => Ok(follower.pose),
            other => Err(other.mismatch("Actor")),
        }
    }

    /// Replace the pose of a 3D prop
    pub fn set_pose(&mut self, pose: Transform3D) -> Result<()> {
        match self {
            Prop::Actor(actor) => actor.pose = pose,
            Prop::Follower(follower) => follower.pose = pose,
            other => return Err(other.mismatch("Actor")),
        }
        Ok(())
    }

    /// Apply `pose` on top of the current pose
    pub fn update_pose(&mut self, pose: Transform3D) -> Result<()> {
        let current = self.pose()?;
        self.set_pose(pose.compose(current))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use nalgebra::Vector3;
    use vizcrate_geometry::line_source;

    fn make_actor() -> Prop {
        Prop::Actor(Actor::new(line_source(
            Point3f::origin(),
            Point3f::new(1.0, 0.0, 0.0),
        )))
    }

    #[test]
    fn test_mismatch_reports_both_types() {
        let prop = make_actor();
        match prop.as_text_actor() {
            Err(Error::PropMismatch { expected, found }) => {
                assert_eq!(expected, "TextActor");
                assert_eq!(found, "Actor");
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_set_color_switches_to_material() {
        let mut prop = Prop::Actor(Actor::with_point_colors(PolyData::new()));
        prop.set_color(Color::red()).unwrap();
        let actor = prop.as_actor().unwrap();
        assert_eq!(actor.scalar_mode, ScalarMode::Material);
        assert_eq!(actor.property.color, [1.0, 0.0, 0.0]);
        assert_relative_eq!(prop.color().unwrap().r, 255.0);
    }

    #[test]
    fn test_update_pose_composes() {
        let mut prop = make_actor();
        prop.set_pose(Transform3D::translation(Vector3::new(1.0, 0.0, 0.0))).unwrap();
        prop.update_pose(Transform3D::uniform_scaling(2.0)).unwrap();
        let bounds = prop.bounds().unwrap();
        assert_relative_eq!(bounds.min.x, 2.0);
        assert_relative_eq!(bounds.max.x, 4.0);
    }

    #[test]
    fn test_follower_set_text_regenerates() {
        let mut follower = Follower::new(VectorText::new("-"), Point3f::new(0.0, 0.0, 1.0), 2.0);
        assert_eq!(follower.geometry().line_count(), 2);
        follower.set_text("H");
        assert_eq!(follower.source().text(), "H");
        assert_eq!(follower.geometry().line_count(), 6);
        let bounds = follower.bounding_box().unwrap();
        assert_relative_eq!(bounds.max.y, 2.0);
        assert_relative_eq!(bounds.min.z, 1.0);
    }
}
