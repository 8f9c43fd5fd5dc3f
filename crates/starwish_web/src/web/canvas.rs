use wasm_bindgen::JsCast;

use starwish::particles::Particle;

fn context_2d(
    canvas: &web_sys::HtmlCanvasElement,
) -> Result<web_sys::CanvasRenderingContext2d, String> {
    canvas
        .get_context("2d")
        .map_err(|_| "canvas: get_context threw".to_string())?
        .ok_or("canvas: missing 2d context".to_string())?
        .dyn_into::<web_sys::CanvasRenderingContext2d>()
        .map_err(|_| "canvas: context is not 2d".to_string())
}

/// Match the backing store to the viewport. Returns the size in pixels.
pub(super) fn fit_to_window(canvas: &web_sys::HtmlCanvasElement) -> (f64, f64) {
    let Some(w) = web_sys::window() else {
        return (canvas.width() as f64, canvas.height() as f64);
    };
    let width = w
        .inner_width()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(canvas.width() as f64);
    let height = w
        .inner_height()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(canvas.height() as f64);
    if canvas.width() != width as u32 {
        canvas.set_width(width as u32);
    }
    if canvas.height() != height as u32 {
        canvas.set_height(height as u32);
    }
    (width, height)
}

/// Transparent overlay: clear, then draw each flake as a filled quad.
pub(super) fn draw_particles(
    canvas: &web_sys::HtmlCanvasElement,
    particles: &[Particle],
) -> Result<(), String> {
    let ctx = context_2d(canvas)?;
    ctx.clear_rect(0.0, 0.0, canvas.width() as f64, canvas.height() as f64);

    for p in particles {
        let [a, b, c, d] = p.quad();
        ctx.set_global_alpha(p.opacity());
        ctx.set_fill_style_str(p.color);
        ctx.begin_path();
        ctx.move_to(a.0.floor(), a.1.floor());
        ctx.line_to(b.0.floor(), b.1.floor());
        ctx.line_to(c.0.floor(), c.1.floor());
        ctx.line_to(d.0.floor(), d.1.floor());
        ctx.close_path();
        ctx.fill();
    }
    ctx.set_global_alpha(1.0);
    Ok(())
}
