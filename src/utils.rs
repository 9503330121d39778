use delaunator::Point;

/// A circle through three foci, described by its center and its lowest point.
///
/// The y axis points down, so the lowest point is `center.y + radius`.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Circle {
    pub center: Point,
    pub bottom: Point,
}

/// Calculates the position where the parabolas of foci `a` and `b` meet when the sweep line is at `sweep_y`.
///
/// `a` is the focus of the arc on the left side of the breakpoint and `b` the focus on the right side.
/// The parabolas open towards the processed part of the plane (smaller y), so the left intersection
/// is picked when `b` is closer to the sweep line and the right one otherwise.
pub(crate) fn breakpoint(a: &Point, b: &Point, sweep_y: f64) -> Point {
    let mut focus = a;

    let x = if a.y == b.y {
        // same directrix and same focal height: the breakpoint is on the vertical bisector
        (a.x + b.x) / 2.0
    } else if a.y == sweep_y {
        // a's parabola is still a vertical ray
        focus = b;
        a.x
    } else if b.y == sweep_y {
        b.x
    } else {
        let p1 = 2.0 * (a.y - sweep_y);
        let p2 = 2.0 * (b.y - sweep_y);

        let qa = 1.0 / p1 - 1.0 / p2;
        let qb = -2.0 * (a.x / p1 - b.x / p2);
        let qc = (a.x * a.x + a.y * a.y - sweep_y * sweep_y) / p1
            - (b.x * b.x + b.y * b.y - sweep_y * sweep_y) / p2;

        let sqrt_d = (qb * qb - 4.0 * qa * qc).max(0.0).sqrt();

        // (-b - sqrt(d)) / 2a, rearranged so b and sqrt(d) never cancel out
        if qb >= 0.0 {
            -0.5 * (qb + sqrt_d) / qa
        } else {
            qc / (-0.5 * (qb - sqrt_d))
        }
    };

    let y = if focus.y == sweep_y {
        // both parabolas are rays, they only meet at infinity above the box
        0.0
    } else {
        ((focus.x - x) * (focus.x - x) + focus.y * focus.y - sweep_y * sweep_y) / (2.0 * focus.y - 2.0 * sweep_y)
    };

    Point { x, y }
}

pub(crate) fn circumcenter(a: &Point, b: &Point, c: &Point) -> Point {
    // move origin to a
    let b_x = b.x - a.x;
    let b_y = b.y - a.y;
    let c_x = c.x - a.x;
    let c_y = c.y - a.y;

    let bb = b_x * b_x + b_y * b_y;
    let cc = c_x * c_x + c_y * c_y;
    let d = 1.0 / (2.0 * (b_x * c_y - b_y * c_x));

    Point {
        x: a.x + d * (c_y * bb - b_y * cc),
        y: a.y + d * (b_x * cc - c_x * bb),
    }
}

/// Returns the circle through `a`, `b` and `c`, or None if the points are collinear.
pub(crate) fn circumcircle(a: &Point, b: &Point, c: &Point) -> Option<Circle> {
    let area = (a.x - b.x) * (c.y - b.y) - (c.x - b.x) * (a.y - b.y);
    if area == 0.0 {
        return None;
    }

    let center = circumcenter(a, b, c);
    let radius = dist2(&center, a).sqrt();
    let bottom = Point { x: center.x, y: center.y + radius };

    Some(Circle { center, bottom })
}

/// Calculates the squared distance between a and b
#[inline]
pub(crate) fn dist2(a: &Point, b: &Point) -> f64 {
    let x = a.x - b.x;
    let y = a.y - b.y;
    (x * x) + (y * y)
}

#[inline]
pub(crate) fn abs_diff_eq(a: f64, b: f64, epsilon: f64) -> bool {
    (if a > b {
        a - b
    } else {
        b - a
    }) <= epsilon
}

/// Whether `a` and `b` are within `precision` of each other on both axes.
#[inline]
pub(crate) fn points_eq(a: &Point, b: &Point, precision: f64) -> bool {
    abs_diff_eq(a.x, b.x, precision) && abs_diff_eq(a.y, b.y, precision)
}

pub(crate) fn calculate_approximated_centroid<'a>(points: impl Iterator<Item = &'a Point>) -> Option<Point> {
    let mut r = Point { x: 0.0 , y: 0.0 };
    let mut n = 0;
    for p in points {
        r.x += p.x;
        r.y += p.y;
        n += 1;
    }

    if n == 0 {
        return None;
    }

    let n = n as f64;
    r.x /= n;
    r.y /= n;

    Some(r)
}


#[cfg(test)]
pub(crate) mod test {
    use delaunator::Point;
    use crate::Voronoi;
    use super::dist2;

    /// Checks the structural properties every diagram must hold, panicking with the offending sites dumped to disk.
    pub fn validate_voronoi(voronoi: &Voronoi) {
        let sites = voronoi.sites();
        let faces = voronoi.faces();
        let bbox = voronoi.bounding_box();
        let scale = 1.0 + bbox.width() + bbox.height();

        if faces.len() != sites.len() {
            fail(voronoi, format!("Expected {} faces, found {}", sites.len(), faces.len()));
        }

        for (index, segment) in voronoi.segments().iter().enumerate() {
            let (a, b) = segment.sites();
            if a == b {
                fail(voronoi, format!("Segment {} separates site {} from itself", index, a));
            }

            let owners: Vec<usize> = faces.iter()
                .filter(|f| f.segments().contains(&index))
                .map(|f| f.site())
                .collect();
            if owners.len() != 2 || !owners.contains(&a) || !owners.contains(&b) {
                fail(voronoi, format!("Segment {} ({}, {}) is listed by faces {:?}", index, a, b, owners));
            }

            if segment.is_degenerate() {
                continue;
            }

            for p in [segment.start(), segment.end()].iter() {
                if !bbox.contains(p) {
                    fail(voronoi, format!("Segment {} endpoint {:?} is outside the bounding box", index, p));
                }

                // every point of a voronoi edge is as far from one site as from the other
                let da = dist2(p, &sites[a]).sqrt();
                let db = dist2(p, &sites[b]).sqrt();
                if (da - db).abs() > 1e-6 * scale {
                    fail(voronoi, format!("Segment {} endpoint {:?} is not equidistant to sites {} and {} ({} vs {})", index, p, a, b, da, db));
                }
            }

            // and the two sites are on opposite sides of it
            let side_a = robust::orient2d(coord(segment.start()), coord(segment.end()), coord(&sites[a]));
            let side_b = robust::orient2d(coord(segment.start()), coord(segment.end()), coord(&sites[b]));
            if side_a * side_b > 0.0 {
                fail(voronoi, format!("Sites {} and {} are on the same side of segment {}", a, b, index));
            }
        }
    }

    fn coord(p: &Point) -> robust::Coord<f64> {
        robust::Coord { x: p.x, y: p.y }
    }

    fn fail(voronoi: &Voronoi, message: String) {
        let path = "test_sites.json";
        let coordinates: Vec<[f64; 2]> = voronoi.sites().iter().map(|p| [p.x, p.y]).collect();
        let s = serde_json::to_string(&coordinates).unwrap();
        std::io::Write::write_all(&mut std::fs::File::create(path).unwrap(), s.as_bytes()).unwrap();
        panic!("Voronoi validation failed. Wrote sites to file '{}'. {}", path, message);
    }

    pub fn random_sites(size: usize, width: f64, height: f64, seed: u64) -> Vec<Point> {
        use rand::{Rng, SeedableRng};
        let mut rng = rand::rngs::StdRng::seed_from_u64(seed);
        let x_range = rand::distributions::Uniform::new(0.0, width);
        let y_range = rand::distributions::Uniform::new(0.0, height);
        (0..size)
            .map(|_| Point { x: rng.sample(x_range), y: rng.sample(y_range) })
            .collect()
    }
}
