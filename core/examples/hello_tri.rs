use mathy_core::geom::tri;
use mathy_core::prelude::*;

fn main() -> Result<()> {
    let (w, h) = (64, 48);

    // A screen-space triangle with a red, a green and a blue corner
    let t = tri(
        vertex(vec3(8.0, 40.0, 0.5).to(), rgb(255.0, 0.0, 0.0)),
        vertex(vec3(56.0, 40.0, 0.5).to(), rgb(0.0, 204.0, 0.0)),
        vertex(vec3(32.0, 8.0, 0.5).to(), rgb(100.0, 100.0, 255.0)),
    );

    let mut rast = Rasterizer::new(w, h)?;
    let frags = rast.rasterize_triangle(&t)?;

    let center = rast.framebuf().color_buf[(w as usize / 2, h as usize / 2)];
    assert_ne!(center, Context::default().color_clear);

    println!("{} fragments, center pixel {center:?}", frags.len());
    println!("{}", rast.stats());
    Ok(())
}
