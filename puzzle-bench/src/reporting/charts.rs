//! Bar charts of per-model results, rendered as PNG

use image::{ImageResult, Rgb, RgbImage};
use std::path::Path;

use crate::analysis::RunReport;

const WIDTH: u32 = 800;
const HEIGHT: u32 = 480;
const MARGIN: u32 = 40;

const BACKGROUND: Rgb<u8> = Rgb([255, 255, 255]);
const AXIS: Rgb<u8> = Rgb([40, 40, 40]);
const GRID: Rgb<u8> = Rgb([225, 225, 225]);
pub const ACCURACY_COLOR: Rgb<u8> = Rgb([76, 114, 176]);
pub const ERROR_COLOR: Rgb<u8> = Rgb([214, 39, 40]);

/// Accuracy per model on a fixed 0..1 scale; models without attempts get no bar
pub fn render_accuracy_chart(report: &RunReport, path: &Path) -> ImageResult<()> {
    let values: Vec<f64> = report
        .model_performance
        .values()
        .map(|s| s.accuracy.unwrap_or(0.0))
        .collect();
    render_bar_chart(&values, 1.0, ACCURACY_COLOR).save(path)
}

/// Error count per model, scaled to the largest count
pub fn render_error_chart(report: &RunReport, path: &Path) -> ImageResult<()> {
    let values: Vec<f64> = report
        .model_performance
        .values()
        .map(|s| s.errors as f64)
        .collect();
    let max = values.iter().copied().fold(1.0, f64::max);
    render_bar_chart(&values, max, ERROR_COLOR).save(path)
}

/// Draw one bar per value, left to right, with quarter gridlines
pub fn render_bar_chart(values: &[f64], max: f64, color: Rgb<u8>) -> RgbImage {
    let mut img = RgbImage::from_pixel(WIDTH, HEIGHT, BACKGROUND);
    let plot_w = WIDTH - 2 * MARGIN;
    let plot_h = HEIGHT - 2 * MARGIN;
    let baseline = HEIGHT - MARGIN;

    for k in 0..4 {
        let y = MARGIN + plot_h * k / 4;
        fill_rect(&mut img, MARGIN, y, WIDTH - MARGIN, y + 1, GRID);
    }

    if !values.is_empty() {
        let slot = plot_w / values.len() as u32;
        for (i, &value) in values.iter().enumerate() {
            let h = bar_height(value, max, plot_h);
            let x0 = MARGIN + slot * i as u32;
            fill_rect(&mut img, x0 + slot / 5, baseline - h, x0 + slot * 4 / 5, baseline, color);
        }
    }

    fill_rect(&mut img, MARGIN, MARGIN, MARGIN + 1, baseline + 1, AXIS);
    fill_rect(&mut img, MARGIN, baseline, WIDTH - MARGIN, baseline + 1, AXIS);
    img
}

fn bar_height(value: f64, max: f64, plot_h: u32) -> u32 {
    if max <= 0.0 || !value.is_finite() {
        return 0;
    }
    ((value / max).clamp(0.0, 1.0) * plot_h as f64).round() as u32
}

fn fill_rect(img: &mut RgbImage, x0: u32, y0: u32, x1: u32, y1: u32, color: Rgb<u8>) {
    for y in y0..y1.min(img.height()) {
        for x in x0..x1.min(img.width()) {
            img.put_pixel(x, y, color);
        }
    }
}
