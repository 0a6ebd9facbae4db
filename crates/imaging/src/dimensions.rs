/// Largest size with the source aspect ratio that fits inside `max_w` x `max_h`.
///
/// Never enlarges and never returns a zero dimension.
pub fn fit_within(src_w: u32, src_h: u32, max_w: u32, max_h: u32) -> (u32, u32) {
    if src_w <= max_w && src_h <= max_h {
        return (src_w, src_h);
    }

    let scale_w = max_w as f64 / src_w as f64;
    let scale_h = max_h as f64 / src_h as f64;
    let scale = scale_w.min(scale_h).min(1.0);

    let new_w = ((src_w as f64 * scale).round() as u32).clamp(1, max_w.max(1));
    let new_h = ((src_h as f64 * scale).round() as u32).clamp(1, max_h.max(1));
    (new_w, new_h)
}
