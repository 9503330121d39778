extern crate image;
use rand::Rng;

use std::env;
use fortune_voronoi::{BoundingBox, Point, Voronoi, VoronoiBuilder};

fn main() {
    let path = env::args().nth(1).expect("path to image file expected as first parameter");
    let factor = env::args().nth(2).expect("expected second argument to be an integer factor").parse::<f64>().expect("expected second argument to be an integer factor") / 10000.0;
    let mut img = image::open(path).expect("Could not open image").into_rgb8();
    let width = img.width() as usize;
    let height = img.height() as usize;

    // generate sites
    let size = (((width * height) as f64 * factor) as usize).max(1);
    println!("Generating {} sites (factor {}, image dimensions: {} x {})", size, factor, width, height);
    let mut rng = rand::thread_rng();
    let x_range = rand::distributions::Uniform::new(0, width);
    let y_range = rand::distributions::Uniform::new(0, height);
    let sites = (0..size)
        .map(move |_| Point { x: rng.sample(x_range) as f64, y: rng.sample(y_range) as f64 })
        .collect();

    println!("Generating voronoi diagram");
    let voronoi = VoronoiBuilder::default()
        .set_sites(sites)
        // image origin is top left corner, same as the bounding box
        .set_bounding_box(BoundingBox::new(width as f64, height as f64))
        .build()
        .expect("Couldn't build voronoi");

    // keep track of accumulated color per cell
    let mut cells = vec![(0usize, 0usize, 0usize, 0usize); voronoi.sites().len()];
    let mut pixel_to_site = vec![0; width * height];

    println!("Accumulating cell colors");
    let mut last_site = 0;
    for x in 0..width {
        for y in 0..height {
            let pindex = width * y + x;
            let x = x as u32;
            let y = y as u32;

            // get site/voronoi cell for which pixel belongs to
            let site = get_cell(&voronoi, last_site, x, y);
            last_site = site;
            pixel_to_site[pindex] = site;

            // accumulate color per cell
            let pixel = img.get_pixel(x, y);
            let cell_site = &mut cells[site];

            cell_site.0 += pixel.0[0] as usize;
            cell_site.1 += pixel.0[1] as usize;
            cell_site.2 += pixel.0[2] as usize;
            cell_site.3 += 1;
        }
    }

    println!("Averaging cell colors");
    for cell in cells.iter_mut() {
        if cell.3 > 0 {
            cell.0 /= cell.3;
            cell.1 /= cell.3;
            cell.2 /= cell.3;
        }
    }

    println!("Generating image");
    // assign averaged color to pixels in cells
    for x in 0..width {
        for y in 0..height {
            let site = pixel_to_site[width * y + x];
            let color = cells[site];
            let pixel = img.get_pixel_mut(x as u32, y as u32);
            pixel.0[0] = color.0 as u8;
            pixel.0[1] = color.1 as u8;
            pixel.0[2] = color.2 as u8;
        }
    }

    // draw cell borders in black
    for segment in voronoi.segments().iter().filter(|s| !s.is_degenerate()) {
        draw_segment(&mut img, segment.start(), segment.end());
    }

    img.save("out.png").expect("Could not save image");
}

fn get_cell(voronoi: &Voronoi, current_site: usize, x: u32, y: u32) -> usize {
    let p = Point { x: x as f64, y: y as f64 };
    voronoi
        .iter_path(current_site, &p)
        .last()
        .expect("Path always contains the starting site")
}

fn draw_segment(img: &mut image::RgbImage, start: &Point, end: &Point) {
    let steps = (end.x - start.x).abs().max((end.y - start.y).abs()).ceil().max(1.0) as usize;
    for step in 0..=steps {
        let t = step as f64 / steps as f64;
        let x = (start.x + t * (end.x - start.x)).round() as u32;
        let y = (start.y + t * (end.y - start.y)).round() as u32;
        if x < img.width() && y < img.height() {
            img.put_pixel(x, y, image::Rgb([0, 0, 0]));
        }
    }
}
