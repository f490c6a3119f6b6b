//! Demo scene for vizcrate
//!
//! Builds one widget of every kind, logs a summary per widget and optionally
//! exports the 3D geometry as OBJ and the summary as JSON.
//!
//! ```text
//! RUST_LOG=debug vizcrate-demo --obj scene.obj --json
//! ```

mod export;

use anyhow::{Context, Result};
use clap::Parser;
use nalgebra::{Matrix3, UnitQuaternion, Vector3, Vector4};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;
use tracing::info;
use vizcrate_core::{Color, Image, Point2i, Point3f, PointBuffer, Rect, Size, Transform3D};
use vizcrate_widgets::*;

use export::{scene_bounds, write_obj, WidgetSummary};

#[derive(Parser, Debug)]
#[command(name = "vizcrate-demo", about = "Build a demo scene of every widget kind")]
struct Args {
    /// Write the 3D geometry of the scene to this Wavefront OBJ file
    #[arg(long)]
    obj: Option<PathBuf>,

    /// Print the scene summary as JSON
    #[arg(long)]
    json: bool,

    /// Widget defaults as JSON; missing fields keep their defaults
    #[arg(long)]
    config: Option<PathBuf>,
}

fn load_config(path: Option<&PathBuf>) -> Result<WidgetConfig> {
    let Some(path) = path else {
        return Ok(WidgetConfig::default());
    };
    let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    let config = serde_json::from_reader(file)
        .with_context(|| format!("parsing {}", path.display()))?;
    Ok(config)
}

/// A gradient test card in blue-green-red order
fn test_card(rows: usize, cols: usize) -> Result<Image> {
    let mut data = Vec::with_capacity(rows * cols * 3);
    for r in 0..rows {
        for c in 0..cols {
            let b = (255 * c / cols.max(1)) as u8;
            let g = (255 * r / rows.max(1)) as u8;
            data.extend_from_slice(&[b, g, 128]);
        }
    }
    Ok(Image::from_u8(rows, cols, 3, data)?)
}

/// A helix of camera steps: forward, turn, climb
fn helix_path(steps: usize) -> Vec<Transform3D> {
    let angle = std::f32::consts::TAU / steps as f32;
    let turn = UnitQuaternion::from_axis_angle(&Vector3::z_axis(), angle);
    (0..steps)
        .map(|_| Transform3D::from_translation_rotation(Vector3::new(0.5, 0.0, 0.05), turn))
        .collect()
}

fn build_scene(factory: &WidgetFactory) -> Result<Vec<Widget>> {
    let k = Matrix3::new(525.0, 0.0, 319.5, 0.0, 525.0, 239.5, 0.0, 0.0, 1.0);
    let card = test_card(48, 64)?;
    let spiral: Vec<Point3f> = (0..64)
        .map(|i| {
            let t = i as f32 * 0.2;
            Point3f::new(t.cos() * (1.0 + t * 0.1), t.sin() * (1.0 + t * 0.1), t * 0.05)
        })
        .collect();

    let mut line = factory.line(Point3f::new(-2.0, 0.0, 0.0), Point3f::new(2.0, 0.0, 0.0));
    line.set_line_width(2.0)?;

    let scene: Vec<Widget> = vec![
        line.into(),
        factory.plane(Vector4::new(0.0, 0.0, 1.0, 0.5)).into(),
        factory.sphere(Point3f::new(0.0, 0.0, 1.0), 0.25).into(),
        factory.arrow(Point3f::origin(), Point3f::new(1.0, 1.0, 1.0)).into(),
        factory.circle(Point3f::new(0.0, 0.0, 0.5), 1.5).into(),
        factory.cylinder(Point3f::new(2.0, 2.0, 0.0), Vector3::new(0.0, 0.0, 1.0), 0.2).into(),
        factory.cube(Point3f::new(-1.0, -1.0, 0.0), Point3f::new(-0.5, -0.5, 0.5)).into(),
        factory.coordinate_system().into(),
        PolyLineWidget::new(&PointBuffer::from_points(&spiral), Color::yellow()).into(),
        factory.grid().into(),
        factory.text3d("origin", Point3f::new(0.1, 0.1, 0.0)).into(),
        factory.text("vizcrate demo", Point2i::new(10, 10)).into(),
        ImageOverlayWidget::new(&card, Rect::new(10, 40, 128, 96))?.into(),
        Image3DWidget::with_pose(
            Point3f::new(0.0, 3.0, 1.0),
            Vector3::new(0.0, -1.0, 0.0),
            Vector3::z(),
            &card,
            Size::new(4, 3),
        )?
        .into(),
        factory.camera_frustum(&k, 0.5).into(),
        factory.trajectory(&helix_path(24)).into(),
    ];
    Ok(scene)
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "vizcrate_widgets=info,vizcrate_geometry=info,vizcrate_demo=info".into()
            }),
        )
        .init();

    let args = Args::parse();
    let config = load_config(args.config.as_ref())?;
    let factory = WidgetFactory::new(config);
    let scene = build_scene(&factory)?;

    let summaries: Vec<WidgetSummary> = scene.iter().map(WidgetSummary::new).collect();
    for summary in &summaries {
        info!(
            kind = summary.kind,
            prop = summary.prop,
            points = summary.points,
            lines = summary.lines,
            polys = summary.polys,
            "widget"
        );
    }
    match scene_bounds(&scene) {
        Some(bounds) => info!(
            widgets = scene.len(),
            min = ?bounds.min,
            max = ?bounds.max,
            "scene built"
        ),
        None => info!(widgets = scene.len(), "scene built"),
    }

    if let Some(path) = &args.obj {
        let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
        let mut writer = BufWriter::new(file);
        write_obj(&mut writer, &scene)?;
        writer.flush()?;
        info!(path = %path.display(), "wrote OBJ");
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&summaries)?);
    }
    Ok(())
}
