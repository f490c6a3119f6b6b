//! Text widgets

use tracing::instrument;
use vizcrate_core::{Color, Point2i, Point3f, Result};
use vizcrate_geometry::VectorText;

use crate::prop::{Follower, FontFamily, Justification, Prop, TextActor, TextProperty};

/// Bold, left-justified Arial
pub(crate) fn default_text_property(font_size: u32, color: Color) -> TextProperty {
    TextProperty {
        font_size,
        font_family: FontFamily::Arial,
        justification: Justification::Left,
        bold: true,
        italic: false,
        color: color.to_rgb_f32(),
    }
}

/// Stroke text in the scene that turns toward the camera
#[derive(Debug, Clone, PartialEq)]
pub struct Text3DWidget {
    pub(crate) prop: Prop,
}

impl Text3DWidget {
    #[instrument(level = "debug")]
    pub fn new(text: &str, position: Point3f, text_scale: f32, color: Color) -> Self {
        let mut follower = Follower::new(VectorText::new(text), position, text_scale);
        follower.property.color = color.to_rgb_f32();
        Self {
            prop: Prop::Follower(follower),
        }
    }

    pub fn set_text(&mut self, text: &str) -> Result<()> {
        self.prop.as_follower_mut()?.set_text(text);
        Ok(())
    }

    pub fn text(&self) -> Result<&str> {
        Ok(self.prop.as_follower()?.source().text())
    }
}

/// Text drawn over the scene at a pixel position
#[derive(Debug, Clone, PartialEq)]
pub struct TextWidget {
    pub(crate) prop: Prop,
}

impl TextWidget {
    #[instrument(level = "debug")]
    pub fn new(text: &str, pos: Point2i, font_size: u32, color: Color) -> Self {
        Self {
            prop: Prop::Text(TextActor {
                text: text.to_owned(),
                position: pos,
                text_property: default_text_property(font_size, color),
            }),
        }
    }

    pub fn set_text(&mut self, text: &str) -> Result<()> {
        self.prop.as_text_actor_mut()?.text = text.to_owned();
        Ok(())
    }

    pub fn text(&self) -> Result<&str> {
        Ok(&self.prop.as_text_actor()?.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::widget::WidgetAccessor;
    use approx::assert_relative_eq;
    use vizcrate_core::Error;

    #[test]
    fn test_text3d_set_text() {
        let position = Point3f::new(1.0, 0.0, 0.0);
        let mut text = Text3DWidget::new("origin", position, 0.5, Color::white());
        assert_eq!(text.text().unwrap(), "origin");
        text.set_text("X").unwrap();
        assert_eq!(text.text().unwrap(), "X");

        let follower = text.prop().as_follower().unwrap();
        assert_eq!(follower.geometry().line_count(), 4);
        let bounds = text.bounds().unwrap();
        assert_relative_eq!(bounds.min.x, 1.0);
        assert_relative_eq!(bounds.max.y, 0.5);
    }

    #[test]
    fn test_text_properties() {
        let mut text = TextWidget::new("fps", Point2i::new(10, 20), 14, Color::green());
        let actor = text.prop().as_text_actor().unwrap();
        assert_eq!(actor.position, Point2i::new(10, 20));
        assert_eq!(actor.text_property.font_size, 14);
        assert_eq!(actor.text_property.font_family, FontFamily::Arial);
        assert_eq!(actor.text_property.justification, Justification::Left);
        assert!(actor.text_property.bold);

        text.set_text("60 fps").unwrap();
        assert_eq!(text.text().unwrap(), "60 fps");
        text.set_color(Color::red()).unwrap();
        assert_eq!(text.color().unwrap(), Color::red());
        assert!(text.bounds().is_none());
    }

    #[test]
    fn test_text_on_foreign_prop() {
        let mut text = Text3DWidget::new("a", Point3f::origin(), 1.0, Color::white());
        *text.prop_mut() = TextWidget::new("b", Point2i::new(0, 0), 10, Color::white()).into_prop();
        assert!(matches!(
            text.set_text("c"),
            Err(Error::PropMismatch { expected: "Follower", found: "TextActor" })
        ));
    }
}
