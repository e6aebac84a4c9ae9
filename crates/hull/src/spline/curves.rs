//! Path emitters for the d3-shape curve families (v3.x semantics), closed
//! variants included. Each function writes an SVG path `d` string.
#![allow(clippy::too_many_arguments)]

use std::fmt::Write;

use crate::types::Point;

/// Format a coordinate with at most three decimals and no trailing zeros
pub fn fmt_coord(value: f64) -> String {
    let rounded = (value * 1000.0).round() / 1000.0;
    if rounded == 0.0 {
        return "0".to_string();
    }
    let mut s = format!("{rounded:.3}");
    while s.ends_with('0') {
        s.pop();
    }
    if s.ends_with('.') {
        s.pop();
    }
    s
}

fn emit_cmd_pair(out: &mut String, cmd: char, x: f64, y: f64) {
    let _ = write!(out, "{cmd}{},{}", fmt_coord(x), fmt_coord(y));
}

fn emit_cmd_cubic(out: &mut String, x1: f64, y1: f64, x2: f64, y2: f64, x: f64, y: f64) {
    let _ = write!(
        out,
        "C{},{},{},{},{},{}",
        fmt_coord(x1),
        fmt_coord(y1),
        fmt_coord(x2),
        fmt_coord(y2),
        fmt_coord(x),
        fmt_coord(y)
    );
}

pub(crate) fn linear_closed_path_d(points: &[Point]) -> String {
    let mut out = String::with_capacity(points.len().saturating_mul(32));
    let Some(first) = points.first() else {
        return out;
    };
    emit_cmd_pair(&mut out, 'M', first.x, first.y);
    for p in points.iter().skip(1) {
        emit_cmd_pair(&mut out, 'L', p.x, p.y);
    }
    out.push('Z');
    out
}

fn basis_point(out: &mut String, x0: f64, y0: f64, x1: f64, y1: f64, x: f64, y: f64) {
    let c1x = (2.0 * x0 + x1) / 3.0;
    let c1y = (2.0 * y0 + y1) / 3.0;
    let c2x = (x0 + 2.0 * x1) / 3.0;
    let c2y = (y0 + 2.0 * y1) / 3.0;
    let ex = (x0 + 4.0 * x1 + x) / 6.0;
    let ey = (y0 + 4.0 * y1 + y) / 6.0;
    emit_cmd_cubic(out, c1x, c1y, c2x, c2y, ex, ey);
}

/// Open uniform B-spline; starts and ends on the first and last points only
pub(crate) fn basis_path_d(points: &[Point]) -> String {
    let mut out = String::with_capacity(points.len().saturating_mul(64));
    if points.is_empty() {
        return out;
    }

    let mut p = 0u8;
    let (mut x0, mut y0, mut x1, mut y1) = (f64::NAN, f64::NAN, f64::NAN, f64::NAN);

    for pt in points {
        let (x, y) = (pt.x, pt.y);
        match p {
            0 => {
                p = 1;
                emit_cmd_pair(&mut out, 'M', x, y);
            }
            1 => {
                p = 2;
            }
            2 => {
                p = 3;
                emit_cmd_pair(&mut out, 'L', (5.0 * x0 + x1) / 6.0, (5.0 * y0 + y1) / 6.0);
                basis_point(&mut out, x0, y0, x1, y1, x, y);
            }
            _ => basis_point(&mut out, x0, y0, x1, y1, x, y),
        }
        x0 = x1;
        x1 = x;
        y0 = y1;
        y1 = y;
    }

    match p {
        3 => {
            basis_point(&mut out, x0, y0, x1, y1, x1, y1);
            emit_cmd_pair(&mut out, 'L', x1, y1);
        }
        2 => emit_cmd_pair(&mut out, 'L', x1, y1),
        _ => {}
    }

    out
}

/// Closed uniform B-spline through none of the input points
pub(crate) fn basis_closed_path_d(points: &[Point]) -> String {
    #[derive(Debug, Clone, Copy)]
    struct BasisClosedState {
        point_state: u8,
        x0: f64,
        y0: f64,
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
        x3: f64,
        y3: f64,
        x4: f64,
        y4: f64,
    }

    impl BasisClosedState {
        fn new() -> Self {
            Self {
                point_state: 0,
                x0: f64::NAN,
                y0: f64::NAN,
                x1: f64::NAN,
                y1: f64::NAN,
                x2: f64::NAN,
                y2: f64::NAN,
                x3: f64::NAN,
                y3: f64::NAN,
                x4: f64::NAN,
                y4: f64::NAN,
            }
        }

        fn point(&mut self, out: &mut String, x: f64, y: f64) {
            match self.point_state {
                0 => {
                    self.point_state = 1;
                    self.x2 = x;
                    self.y2 = y;
                }
                1 => {
                    self.point_state = 2;
                    self.x3 = x;
                    self.y3 = y;
                }
                2 => {
                    self.point_state = 3;
                    self.x4 = x;
                    self.y4 = y;
                    emit_cmd_pair(
                        out,
                        'M',
                        (self.x0 + 4.0 * self.x1 + x) / 6.0,
                        (self.y0 + 4.0 * self.y1 + y) / 6.0,
                    );
                }
                _ => basis_point(out, self.x0, self.y0, self.x1, self.y1, x, y),
            }
            self.x0 = self.x1;
            self.x1 = x;
            self.y0 = self.y1;
            self.y1 = y;
        }

        fn line_end(&mut self, out: &mut String) {
            match self.point_state {
                1 => {
                    emit_cmd_pair(out, 'M', self.x2, self.y2);
                    out.push('Z');
                }
                2 => {
                    emit_cmd_pair(out, 'M', (self.x2 + 2.0 * self.x3) / 3.0, (self.y2 + 2.0 * self.y3) / 3.0);
                    emit_cmd_pair(out, 'L', (self.x3 + 2.0 * self.x2) / 3.0, (self.y3 + 2.0 * self.y2) / 3.0);
                    out.push('Z');
                }
                3 => {
                    let (x2, y2, x3, y3, x4, y4) = (self.x2, self.y2, self.x3, self.y3, self.x4, self.y4);
                    self.point(out, x2, y2);
                    self.point(out, x3, y3);
                    self.point(out, x4, y4);
                    out.push('Z');
                }
                _ => {}
            }
        }
    }

    let mut out = String::with_capacity(points.len().saturating_mul(64));
    let mut state = BasisClosedState::new();
    for p in points {
        state.point(&mut out, p.x, p.y);
    }
    state.line_end(&mut out);
    out
}

/// Closed cardinal spline through every input point
pub(crate) fn cardinal_closed_path_d(points: &[Point], tension: f64) -> String {
    let mut out = String::with_capacity(points.len().saturating_mul(64));
    let mut state = ClosedInterpolatingState::new(Weighting::Cardinal {
        k: (1.0 - tension) / 6.0,
    });
    for p in points {
        state.point(&mut out, p.x, p.y);
    }
    state.line_end(&mut out);
    out
}

/// Closed Catmull-Rom spline through every input point.
///
/// `alpha` 0 is uniform, 0.5 centripetal, 1 chordal parameterization.
pub(crate) fn catmull_rom_closed_path_d(points: &[Point], alpha: f64) -> String {
    let mut out = String::with_capacity(points.len().saturating_mul(64));
    let mut state = ClosedInterpolatingState::new(Weighting::CatmullRom { alpha });
    for p in points {
        state.point(&mut out, p.x, p.y);
    }
    state.line_end(&mut out);
    out
}

const EPSILON: f64 = 1e-12;

#[derive(Debug, Clone, Copy)]
enum Weighting {
    Cardinal { k: f64 },
    CatmullRom { alpha: f64 },
}

/// Shared state machine of the closed cardinal and Catmull-Rom curves.
///
/// The first three points are held back and replayed at the end so the
/// loop joins smoothly onto its own start.
#[derive(Debug, Clone, Copy)]
struct ClosedInterpolatingState {
    weighting: Weighting,
    point_state: u8,
    x0: f64,
    y0: f64,
    x1: f64,
    y1: f64,
    x2: f64,
    y2: f64,
    x3: f64,
    y3: f64,
    x4: f64,
    y4: f64,
    x5: f64,
    y5: f64,
    l01_a: f64,
    l12_a: f64,
    l23_a: f64,
    l01_2a: f64,
    l12_2a: f64,
    l23_2a: f64,
}

impl ClosedInterpolatingState {
    fn new(weighting: Weighting) -> Self {
        Self {
            weighting,
            point_state: 0,
            x0: f64::NAN,
            y0: f64::NAN,
            x1: f64::NAN,
            y1: f64::NAN,
            x2: f64::NAN,
            y2: f64::NAN,
            x3: f64::NAN,
            y3: f64::NAN,
            x4: f64::NAN,
            y4: f64::NAN,
            x5: f64::NAN,
            y5: f64::NAN,
            l01_a: 0.0,
            l12_a: 0.0,
            l23_a: 0.0,
            l01_2a: 0.0,
            l12_2a: 0.0,
            l23_2a: 0.0,
        }
    }

    fn emit_segment(&self, out: &mut String, x: f64, y: f64) {
        match self.weighting {
            Weighting::Cardinal { k } => emit_cmd_cubic(
                out,
                self.x1 + k * (self.x2 - self.x0),
                self.y1 + k * (self.y2 - self.y0),
                self.x2 + k * (self.x1 - x),
                self.y2 + k * (self.y1 - y),
                self.x2,
                self.y2,
            ),
            Weighting::CatmullRom { .. } => {
                let mut x1 = self.x1;
                let mut y1 = self.y1;
                let mut x2 = self.x2;
                let mut y2 = self.y2;

                if self.l01_a > EPSILON {
                    let a = 2.0 * self.l01_2a + 3.0 * self.l01_a * self.l12_a + self.l12_2a;
                    let n = 3.0 * self.l01_a * (self.l01_a + self.l12_a);
                    if n != 0.0 && n.is_finite() {
                        x1 = (x1 * a - self.x0 * self.l12_2a + self.x2 * self.l01_2a) / n;
                        y1 = (y1 * a - self.y0 * self.l12_2a + self.y2 * self.l01_2a) / n;
                    }
                }

                if self.l23_a > EPSILON {
                    let b = 2.0 * self.l23_2a + 3.0 * self.l23_a * self.l12_a + self.l12_2a;
                    let m = 3.0 * self.l23_a * (self.l23_a + self.l12_a);
                    if m != 0.0 && m.is_finite() {
                        // Uses the unadjusted x1/y1, matching d3.
                        x2 = (x2 * b + self.x1 * self.l23_2a - x * self.l12_2a) / m;
                        y2 = (y2 * b + self.y1 * self.l23_2a - y * self.l12_2a) / m;
                    }
                }

                emit_cmd_cubic(out, x1, y1, x2, y2, self.x2, self.y2);
            }
        }
    }

    fn point(&mut self, out: &mut String, x: f64, y: f64) {
        if let Weighting::CatmullRom { alpha } = self.weighting {
            if self.point_state != 0 {
                let dx = self.x2 - x;
                let dy = self.y2 - y;
                self.l23_2a = (dx * dx + dy * dy).powf(alpha);
                self.l23_a = self.l23_2a.sqrt();
            }
        }

        match self.point_state {
            0 => {
                self.point_state = 1;
                self.x3 = x;
                self.y3 = y;
            }
            1 => {
                self.point_state = 2;
                self.x4 = x;
                self.y4 = y;
                emit_cmd_pair(out, 'M', x, y);
            }
            2 => {
                self.point_state = 3;
                self.x5 = x;
                self.y5 = y;
            }
            _ => self.emit_segment(out, x, y),
        }

        self.l01_a = self.l12_a;
        self.l12_a = self.l23_a;
        self.l01_2a = self.l12_2a;
        self.l12_2a = self.l23_2a;

        self.x0 = self.x1;
        self.x1 = self.x2;
        self.x2 = x;
        self.y0 = self.y1;
        self.y1 = self.y2;
        self.y2 = y;
    }

    fn line_end(&mut self, out: &mut String) {
        match self.point_state {
            1 => {
                emit_cmd_pair(out, 'M', self.x3, self.y3);
                out.push('Z');
            }
            2 => {
                emit_cmd_pair(out, 'L', self.x3, self.y3);
                out.push('Z');
            }
            3 => {
                let (x3, y3, x4, y4, x5, y5) = (self.x3, self.y3, self.x4, self.y4, self.x5, self.y5);
                self.point(out, x3, y3);
                self.point(out, x4, y4);
                self.point(out, x5, y5);
                out.push('Z');
            }
            _ => {}
        }
    }
}
