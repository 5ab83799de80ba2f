//! Cairo-based rendering for the stroke log.

use super::color::Color;
use super::drawing::Drawing;
use super::point::StrokePoint;

/// Fills the whole target with the background color, replacing existing pixels.
pub fn render_background(ctx: &cairo::Context, background: Color) -> Result<(), cairo::Error> {
    ctx.save()?;
    ctx.set_operator(cairo::Operator::Source);
    ctx.set_source_rgba(background.r, background.g, background.b, background.a);
    let result = ctx.paint();
    ctx.restore()?;
    result
}

/// Strokes a single segment using the attributes of its end point.
///
/// This is the only primitive used both for live drawing and for replay, which
/// keeps the two pixel-identical.
pub fn render_segment(
    ctx: &cairo::Context,
    from: &StrokePoint,
    to: &StrokePoint,
    background: Color,
) -> Result<(), cairo::Error> {
    let color = to.stroke_color(background);

    ctx.new_path();
    ctx.set_source_rgba(color.r, color.g, color.b, color.a);
    ctx.set_line_width(to.size);
    ctx.set_line_cap(cairo::LineCap::Round);
    ctx.set_line_join(cairo::LineJoin::Round);
    ctx.move_to(from.x, from.y);
    ctx.line_to(to.x, to.y);
    ctx.stroke()
}

/// Clears the target to `background` and redraws every segment of `drawing` in order.
///
/// Returns the number of segments stroked.
pub fn replay(
    ctx: &cairo::Context,
    drawing: &Drawing,
    background: Color,
) -> Result<usize, cairo::Error> {
    render_background(ctx, background)?;

    let mut stroked = 0;
    for (from, to) in drawing.segments() {
        render_segment(ctx, from, to, background)?;
        stroked += 1;
    }
    Ok(stroked)
}
