//! Spinning cube and cylinder, with a 2D line and circle drawn each frame.
//!
//! Run with `cargo run --example spinning_cube`. Moving the pointer towards
//! the right edge of the window speeds up the rotation, Escape quits.

use canvas_playground::prelude::*;

struct SpinningShapes {
    speed: f32,
}

impl Sketch for SpinningShapes {
    fn setup(&mut self, setup: &mut SetupContext<'_>) -> anyhow::Result<()> {
        let texture = canvas_playground::gfx::resources::create_solid_texture(setup.ctx, random_color());

        setup
            .shapes
            .add(Mesh::cube(setup.ctx, Vector3::new(-1.5, 0.0, 0.0), 0.75, Some(texture))?);
        setup.shapes.add(Mesh::circle(
            setup.ctx,
            CircleDescriptor::new([1.5, 0.0, 0.0])
                .with_radius(0.75)
                .with_depth(0.5)
                .with_quality(0.2),
        )?);

        setup.scene.set_lighting_type(setup.ctx, LightingMode::Ambient);
        setup.inspector.globalize("speed", self.speed);
        Ok(())
    }

    fn draw(&mut self, frame: &mut Frame<'_>) -> anyhow::Result<()> {
        let width = frame.surface.width.max(1) as f32;
        let boost = map_range(frame.pointer.x as f32, 0.0, width, 0.5, 2.0);
        let step = self.speed * boost;

        frame.scene.rotate_y(frame.ctx, step);
        frame.scene.rotate_x(frame.ctx, step * 0.5);

        let t = frame.elapsed.as_secs_f32();
        frame.canvas.stroke([255, 255, 255]);
        frame.canvas.stroke_weight(0.03);
        frame.canvas.line(frame.ctx, -1.5, 0.0, 1.5, 0.0)?;
        frame.canvas.fill([255, 200, 0]);
        frame.canvas.circle(frame.ctx, 1.5 * t.cos(), 0.0, 0.2)?;
        Ok(())
    }
}

fn main() -> anyhow::Result<()> {
    canvas_playground::init_logging();

    let config = PlaygroundConfig::default()
        .with_window(WindowConfig::default().with_title("Spinning Cube"))
        .with_scene(SceneConfig::default().with_background([0.05, 0.05, 0.1, 1.0]));

    PlaygroundApp::new(config, SpinningShapes { speed: 0.01 }).run()?;
    Ok(())
}
