use clap::Parser;
use rand::{Rng, SeedableRng};
use fortune_voronoi::{BoundingBox, Point, Voronoi, VoronoiBuilder};
use std::{fs::File, io::Write, path::PathBuf};

const POINT_SIZE: usize = 2;
const SITE_COLOR: &str = "black";
const LINE_WIDTH: usize = 1;
const VORONOI_EDGE_COLOR: &str = "blue";
const DELAUNAY_EDGE_COLOR: &str = "lightgray";

/// Renders the Voronoi diagram of random sites as SVG
#[derive(Parser, Debug)]
#[clap(name = "svg", about)]
struct Args {
    /// Number of random sites
    #[clap(long, default_value_t = 10)]
    count: usize,

    /// Seed for the site generator
    #[clap(long)]
    seed: Option<u64>,

    #[clap(long, default_value_t = 800.0)]
    width: f64,

    #[clap(long, default_value_t = 800.0)]
    height: f64,

    /// Tolerance used when comparing points during the sweep
    #[clap(long, default_value_t = fortune_voronoi::DEFAULT_PRECISION)]
    precision: f64,

    /// Lloyd relaxation iterations
    #[clap(long, default_value_t = 0)]
    lloyd: usize,

    /// Also draw the dual Delaunay edges
    #[clap(long)]
    delaunay: bool,

    #[clap(long, short, default_value = "example.svg")]
    output: PathBuf,
}

fn main() -> std::io::Result<()> {
    let args = Args::parse();

    // generate random sites
    let mut rng = match args.seed {
        Some(seed) => rand::rngs::StdRng::seed_from_u64(seed),
        None => rand::rngs::StdRng::from_entropy(),
    };
    let x_range = rand::distributions::Uniform::new(0., args.width);
    let y_range = rand::distributions::Uniform::new(0., args.height);
    let sites = (0..args.count)
        .map(|_| Point { x: rng.sample(x_range), y: rng.sample(y_range) })
        .collect::<Vec<Point>>();

    // build voronoi
    let voronoi = VoronoiBuilder::default()
        .set_sites(sites)
        .set_bounding_box(BoundingBox::new(args.width, args.height))
        .set_precision(args.precision)
        .set_lloyd_relaxation_iterations(args.lloyd)
        .build()
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e))?;

    // generate SVG
    let contents = format!(
        r#"
<svg viewBox="0 0 {width} {height}" xmlns="http://www.w3.org/2000/svg">
<rect width="100%" height="100%" fill="white" />
    {delaunay_edges}
    {voronoi_edges}
    {sites}
</svg>"#,
        width = args.width,
        height = args.height,
        delaunay_edges = if args.delaunay { render_delaunay_edges(&voronoi) } else { String::new() },
        voronoi_edges = render_voronoi_edges(&voronoi),
        sites = render_point(voronoi.sites()),
    );
    File::create(&args.output)?.write_all(contents.as_bytes())?;
    println!("{} sites, {} segments written to {}", voronoi.sites().len(), voronoi.segments().len(), args.output.display());

    Ok(())
}

fn render_point(points: &[Point]) -> String {
    points
        .iter()
        .fold(String::new(), |acc, p| {
            acc + &format!(
                r#"<circle cx="{x}" cy="{y}" r="{size}" fill="{color}"/>"#,
                x = p.x,
                y = p.y,
                size = POINT_SIZE,
                color = SITE_COLOR
            )
        })
}

fn render_line(start: &Point, end: &Point, color: &str) -> String {
    format!(r#"<line x1="{x0}" y1="{y0}" x2="{x1}" y2="{y1}" style="stroke:{color};stroke-width:{width}" />"#,
        x0 = start.x,
        y0 = start.y,
        x1 = end.x,
        y1 = end.y,
        width = LINE_WIDTH,
        color = color)
}

fn render_voronoi_edges(voronoi: &Voronoi) -> String {
    // segments clipped out of the box collapse to a point, nothing to draw
    voronoi.segments()
        .iter()
        .filter(|s| !s.is_degenerate())
        .fold(String::new(), |acc, s| acc + &render_line(s.start(), s.end(), VORONOI_EDGE_COLOR))
}

fn render_delaunay_edges(voronoi: &Voronoi) -> String {
    let sites = voronoi.sites();
    voronoi.iter_delaunay_edges()
        .fold(String::new(), |acc, (a, b)| acc + &render_line(&sites[a], &sites[b], DELAUNAY_EDGE_COLOR))
}
