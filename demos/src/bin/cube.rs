//! Renders the colored cube into the terminal.

use std::error::Error;

use log::info;

use mt::prelude::*;
use mt_front::ansi;

fn main() -> std::result::Result<(), Box<dyn Error>> {
    env_logger::init();

    let (w, h) = (80, 48);

    let mut cube = GameObject::cube();
    cube.transform
        .rotate(degs(25.0), degs(40.0), degs(0.0))?
        .translate(0.0, 0.0, -4.5)?;

    let cam = Camera::default();
    let proj = Projection::new(w, h, degs(60.0), 0.1, 100.0)?;

    let mut rast = Rasterizer::new(w, h)?;
    rast.clear();
    let frags = rast.render(&cube, &cam, &proj)?;
    info!("{} fragments written", frags.len());

    ansi::print(&rast.framebuf().color_buf)?;
    println!("{}", rast.stats());
    Ok(())
}
