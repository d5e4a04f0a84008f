//! A rotating cube in a window. Press Esc to quit.

use std::error::Error;
use std::ops::ControlFlow::*;

use log::warn;

use mt::prelude::*;
use mt_front::minifb::Window;

fn main() -> std::result::Result<(), Box<dyn Error>> {
    env_logger::init();

    let mut win = Window::builder().title("mathy//spin").build()?;

    let (w, h) = win.dims;
    let proj = Projection::new(w, h, degs(60.0), 0.1, 100.0)?;
    let cam = Camera::new(
        vec3(0.0, 1.5, 4.0).to(),
        vec3(0.0, 0.0, -2.0).to(),
        vec3(0.0, 1.0, 0.0).to(),
    );

    win.run(|frame| {
        let secs = frame.t.as_secs_f64();

        let mut cube = GameObject::cube();
        let placed = cube
            .transform
            .translate(0.0, 0.0, -2.0)
            .and_then(|tf| tf.rotate(rads(secs * 0.7), rads(secs), rads(0.0)));
        if let Err(e) = placed {
            warn!("cannot place cube: {e}");
            return Break(());
        }
        match frame.rast.render(&cube, &cam, &proj) {
            Ok(_) => Continue(()),
            Err(e) => {
                warn!("cannot render cube: {e}");
                Break(())
            }
        }
    })?;
    Ok(())
}
