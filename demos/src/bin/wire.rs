//! Draws the edges of the cube into the terminal as line segments.

use std::error::Error;

use mt::prelude::*;
use mt_front::ansi;

const GREEN: Color3 = rgb(64.0, 255.0, 96.0);

/// Plots the segment from `a` to `b` into `buf`, one pixel per step
/// along the longer axis. Pixels outside the buffer are skipped.
fn plot<B>(buf: &mut Buf2<Color3>, Edge(a, b): &Edge<Vec2<B>>, col: Color3) {
    let d = *b - *a;
    let steps = d.x().abs().max(d.y().abs()).ceil().max(1.0) as usize;
    for i in 0..=steps {
        let p = *a + d * (i as f64 / steps as f64);
        let (x, y) = (p.x().floor(), p.y().floor());
        if x < 0.0 || y < 0.0 {
            continue;
        }
        if let Some(px) = buf.get_mut(x as usize, y as usize) {
            *px = col;
        }
    }
}

fn main() -> std::result::Result<(), Box<dyn Error>> {
    env_logger::init();

    let (w, h) = (80, 48);

    let mut cube = GameObject::cube();
    cube.transform
        .rotate(degs(20.0), degs(30.0), degs(0.0))?
        .translate(0.0, 0.0, -5.0)?;

    let cam = Camera::default();
    let proj = Projection::new(w, h, degs(60.0), 0.1, 100.0)?;

    let mut rast = Rasterizer::new(w, h)?;
    let edges = rast.wireframe(&cube, &cam, &proj)?;

    let mut buf = Buf2::new_filled(w as usize, h as usize, rgb(0.0, 0.0, 0.0));
    for e in &edges {
        plot(&mut buf, e, GREEN);
    }
    ansi::print(&buf)?;
    println!("{} segments", edges.len());
    Ok(())
}
