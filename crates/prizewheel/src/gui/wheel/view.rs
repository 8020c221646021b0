use super::{
    CENTER, HUB_RADIUS, HUB_RING_RADIUS, INNER_RING_WIDTH, LABEL_FONT_SIZE, LABEL_INSET,
    OUTER_GLOW_WIDTH, OUTER_RING_WIDTH, POINTER_HEIGHT, POINTER_LIFT, POINTER_WIDTH, RADIUS,
    SECTOR_SHADE, WHEEL_SIZE,
};
use crate::gui::theme::ThemeColors;
use cairo::{Context, Format, ImageSurface, RadialGradient};
use palette::Srgba;
use std::f64::consts::PI;
use std::iter::zip;
use wheelspin::layout::FULL_TURN;
use wheelspin::{Prize, PrizeColor, PrizeList, Sector, layout};

fn set_source(cr: &Context, color: Srgba<f64>) {
    let (r, g, b, a) = color.into_components();
    cr.set_source_rgba(r, g, b, a);
}

fn add_stop(gradient: &RadialGradient, offset: f64, color: Srgba<f64>) {
    let (r, g, b, a) = color.into_components();
    gradient.add_color_stop_rgba(offset, r, g, b, a);
}

struct SectorRenderer<'a> {
    prize: &'a Prize,
    sector: Sector,
}

impl<'a> SectorRenderer<'a> {
    fn new(prize: &'a Prize, sector: Sector) -> Self {
        Self { prize, sector }
    }

    fn draw(&self, cr: &Context) -> Result<(), cairo::Error> {
        self.draw_wedge(cr)?;
        self.draw_label(cr)
    }

    fn draw_wedge(&self, cr: &Context) -> Result<(), cairo::Error> {
        cr.new_path();
        cr.move_to(CENTER, CENTER);
        cr.arc(
            CENTER,
            CENTER,
            RADIUS,
            self.sector.start.to_radians(),
            self.sector.end().to_radians(),
        );
        cr.close_path();

        let gradient = RadialGradient::new(CENTER, CENTER, 0.0, CENTER, CENTER, RADIUS);
        let (r, g, b) = self.prize.color.components();
        gradient.add_color_stop_rgb(0.0, r, g, b);
        let (r, g, b) = self.prize.color.shade(SECTOR_SHADE).components();
        gradient.add_color_stop_rgb(1.0, r, g, b);
        cr.set_source(&gradient)?;
        cr.fill_preserve()?;

        cr.set_source_rgba(1.0, 1.0, 1.0, 0.2);
        cr.set_line_width(1.0);
        cr.stroke()
    }

    /// Label along the sector's bisector, ending [`LABEL_INSET`] inside the rim.
    fn draw_label(&self, cr: &Context) -> Result<(), cairo::Error> {
        let label = self.prize.name.label();

        cr.save()?;
        cr.translate(CENTER, CENTER);
        cr.rotate(self.sector.mid().to_radians());
        cr.select_font_face("Sans", cairo::FontSlant::Normal, cairo::FontWeight::Bold);
        cr.set_font_size(LABEL_FONT_SIZE);

        if let Ok(ext) = cr.text_extents(&label) {
            let x = RADIUS - LABEL_INSET - ext.width() - ext.x_bearing();
            let y = -(ext.y_bearing() + ext.height() / 2.0);

            cr.set_source_rgba(0.0, 0.0, 0.0, 0.5);
            cr.move_to(x + 1.0, y + 1.0);
            cr.show_text(&label)?;

            cr.set_source_rgb(1.0, 1.0, 1.0);
            cr.move_to(x, y);
            cr.show_text(&label)?;
        }
        cr.restore()
    }
}

fn draw_outer_ring(cr: &Context, colors: &ThemeColors) -> Result<(), cairo::Error> {
    cr.new_path();
    cr.arc(CENTER, CENTER, RADIUS + OUTER_RING_WIDTH, 0.0, 2.0 * PI);

    let gradient = RadialGradient::new(
        CENTER,
        CENTER,
        RADIUS,
        CENTER,
        CENTER,
        RADIUS + OUTER_GLOW_WIDTH,
    );
    add_stop(&gradient, 0.0, colors.ring_dark);
    add_stop(&gradient, 0.8, colors.ring_light);
    add_stop(&gradient, 1.0, colors.ring_dark);
    cr.set_source(&gradient)?;
    cr.fill_preserve()?;

    set_source(cr, colors.ring_border);
    cr.set_line_width(2.0);
    cr.stroke()
}

fn draw_inner_ring(cr: &Context) -> Result<(), cairo::Error> {
    cr.new_path();
    cr.arc(CENTER, CENTER, RADIUS, 0.0, 2.0 * PI);
    cr.set_source_rgba(1.0, 1.0, 1.0, 0.1);
    cr.set_line_width(INNER_RING_WIDTH);
    cr.stroke()
}

fn draw_hub(cr: &Context, colors: &ThemeColors) -> Result<(), cairo::Error> {
    cr.new_path();
    cr.arc(CENTER, CENTER, HUB_RADIUS, 0.0, 2.0 * PI);
    let gradient = RadialGradient::new(CENTER, CENTER, 0.0, CENTER, CENTER, HUB_RADIUS);
    add_stop(&gradient, 0.0, colors.hub_light);
    add_stop(&gradient, 1.0, colors.hub_dark);
    cr.set_source(&gradient)?;
    cr.fill()?;

    cr.arc(CENTER, CENTER, HUB_RING_RADIUS, 0.0, 2.0 * PI);
    cr.set_source_rgba(0.0, 0.0, 0.0, 0.1);
    cr.set_line_width(2.0);
    cr.stroke()
}

/// Renders the whole wheel face at `scale` device pixels per logical pixel.
fn render_wheel(
    prizes: &PrizeList,
    scale: i32,
    colors: &ThemeColors,
) -> Result<ImageSurface, cairo::Error> {
    let scale = scale.max(1);
    let pixels = (WHEEL_SIZE * f64::from(scale)).ceil() as i32;
    let surface = ImageSurface::create(Format::ARgb32, pixels, pixels)?;
    surface.set_device_scale(f64::from(scale), f64::from(scale));

    {
        let cr = Context::new(&surface)?;
        draw_outer_ring(&cr, colors)?;
        for (prize, sector) in zip(prizes, layout(prizes)) {
            SectorRenderer::new(prize, sector).draw(&cr)?;
        }
        draw_inner_ring(&cr)?;
        draw_hub(&cr, colors)?;
    }
    surface.flush();
    Ok(surface)
}

struct CachedWheel {
    prizes: PrizeList,
    scale: i32,
    colors: ThemeColors,
    surface: ImageSurface,
}

impl CachedWheel {
    fn matches(&self, prizes: &PrizeList, scale: i32, colors: &ThemeColors) -> bool {
        self.scale == scale && self.prizes == *prizes && self.colors == *colors
    }
}

/// Keeps the rendered wheel face until the prizes, the device scale or the theme change.
#[derive(Default)]
pub struct WheelRenderer {
    cache: Option<CachedWheel>,
    renders: u64,
}

impl WheelRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn surface(
        &mut self,
        prizes: &PrizeList,
        scale: i32,
        colors: &ThemeColors,
    ) -> Result<&ImageSurface, cairo::Error> {
        let cached = match self.cache.take() {
            Some(cached) if cached.matches(prizes, scale, colors) => cached,
            _ => {
                self.renders += 1;
                log::debug!(
                    "Rendering wheel face for {} prizes at scale {}",
                    prizes.len(),
                    scale
                );
                CachedWheel {
                    prizes: prizes.clone(),
                    scale,
                    colors: colors.clone(),
                    surface: render_wheel(prizes, scale, colors)?,
                }
            }
        };
        Ok(&self.cache.insert(cached).surface)
    }

    /// How many times the wheel face has been drawn from scratch.
    pub fn renders(&self) -> u64 {
        self.renders
    }
}

fn draw_pointer(cr: &Context, colors: &ThemeColors) -> Result<(), cairo::Error> {
    let top = -CENTER - POINTER_LIFT;
    let half = POINTER_WIDTH / 2.0;
    let shoulder = top + 10.0;

    cr.new_path();
    cr.move_to(0.0, top + POINTER_HEIGHT);
    cr.line_to(-half, shoulder);
    cr.curve_to(-half, top + 10.0 / 3.0, -half / 3.0, top, 0.0, top);
    cr.curve_to(half / 3.0, top, half, top + 10.0 / 3.0, half, shoulder);
    cr.close_path();

    set_source(cr, colors.pointer);
    cr.fill_preserve()?;
    cr.set_source_rgb(1.0, 1.0, 1.0);
    cr.set_line_width(2.0);
    cr.stroke()?;

    cr.arc(0.0, top + 15.0, 5.0, 0.0, 2.0 * PI);
    cr.set_source_rgba(1.0, 1.0, 1.0, 0.5);
    cr.fill()
}

fn draw_celebration(cr: &Context, color: PrizeColor) -> Result<(), cairo::Error> {
    let (r, g, b) = color.components();
    let gradient = RadialGradient::new(0.0, 0.0, RADIUS, 0.0, 0.0, CENTER);
    gradient.add_color_stop_rgba(0.0, r, g, b, 0.6);
    gradient.add_color_stop_rgba(1.0, r, g, b, 0.0);

    cr.new_path();
    cr.arc(0.0, 0.0, CENTER, 0.0, 2.0 * PI);
    cr.set_source(&gradient)?;
    cr.fill()
}

/// Draws one frame: the cached face turned by `angle` degrees, with the pointer fixed on top.
pub fn draw(
    cr: &Context,
    face: &ImageSurface,
    angle: f64,
    width: i32,
    height: i32,
    colors: &ThemeColors,
    celebration: Option<PrizeColor>,
) -> Result<(), cairo::Error> {
    let fit = (f64::from(width.min(height)) / (WHEEL_SIZE + 2.0 * POINTER_LIFT)).min(1.0);

    cr.save()?;
    cr.translate(f64::from(width) / 2.0, f64::from(height) / 2.0);
    cr.scale(fit, fit);

    if let Some(color) = celebration {
        draw_celebration(cr, color)?;
    }

    cr.save()?;
    cr.rotate(angle.rem_euclid(FULL_TURN).to_radians());
    cr.set_source_surface(face, -CENTER, -CENTER)?;
    cr.paint()?;
    cr.restore()?;

    draw_pointer(cr, colors)?;
    cr.restore()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn list(weights: &[f64]) -> PrizeList {
        PrizeList::new(
            weights
                .iter()
                .enumerate()
                .map(|(i, w)| {
                    Prize::new(
                        i.to_string(),
                        format!("Prize {i}"),
                        *w,
                        PrizeColor::from_palette(i),
                    )
                })
                .collect(),
        )
        .unwrap()
    }

    #[test]
    fn test_face_is_reused_until_prizes_or_scale_change() {
        let mut renderer = WheelRenderer::new();
        let colors = ThemeColors::default();
        let prizes = list(&[1.0, 2.0, 3.0]);

        renderer.surface(&prizes, 1, &colors).unwrap();
        renderer.surface(&prizes, 1, &colors).unwrap();
        assert_eq!(renderer.renders(), 1);

        let surface = renderer.surface(&prizes, 2, &colors).unwrap();
        assert_eq!(surface.width(), (WHEEL_SIZE * 2.0) as i32);
        assert_eq!(renderer.renders(), 2);

        renderer.surface(&list(&[1.0, 1.0]), 2, &colors).unwrap();
        assert_eq!(renderer.renders(), 3);
    }

    #[test]
    fn test_frame_draws_onto_surface() {
        let mut renderer = WheelRenderer::new();
        let colors = ThemeColors::default();
        let prizes = list(&[1.0, 1.0]);
        let target = ImageSurface::create(Format::ARgb32, 600, 600).unwrap();
        let cr = Context::new(&target).unwrap();

        let face = renderer.surface(&prizes, 1, &colors).unwrap();
        let glow = Some(PrizeColor::from_palette(0));
        draw(&cr, face, 12_345.6, 600, 600, &colors, glow).unwrap();
    }
}
