use std::process::exit;

use clap::Parser;
use rand::Rng;
use fortune_voronoi::{BoundingBox, Point, Voronoi, VoronoiBuilder};

/// Builds many small random diagrams and checks that every segment lies on the bisector of its two sites
#[derive(Parser, Debug)]
#[clap(name = "checker", about)]
struct Args {
    /// Number of sites per diagram
    #[clap(long, default_value_t = 15)]
    size: usize,

    #[clap(long, default_value_t = 50_000)]
    tries: usize,

    /// Sites are generated in [0, range) on both axes
    #[clap(long, default_value_t = 10.0)]
    range: f64,
}

fn main() {
    let args = Args::parse();
    let mut rng = rand::thread_rng();
    let coord_range = rand::distributions::Uniform::new(0.0, args.range);

    println!("Checking {} voronoi diagrams of size {}", args.tries, args.size);

    for _ in 0..args.tries {
        // generate random sites
        let sites = (0..args.size)
            .map(|_| Point { x: rng.sample(coord_range), y: rng.sample(coord_range) })
            .collect::<Vec<_>>();

        // build voronoi
        let voronoi = VoronoiBuilder::default()
            .set_sites(sites)
            .set_bounding_box(BoundingBox::new_square(args.range))
            .build()
            .expect("Couldn't build voronoi");

        if voronoi.segments().len() > 3 * args.size.max(3) - 6 {
            println!("Too many segments: {}", voronoi.segments().len());
            fail(&voronoi);
        }

        let tolerance = 1e-6 * (1.0 + args.range);
        for (index, segment) in voronoi.segments().iter().enumerate().filter(|(_, s)| !s.is_degenerate()) {
            let (a, b) = segment.sites();
            let (a, b) = (&voronoi.sites()[a], &voronoi.sites()[b]);

            for p in [segment.start(), segment.end()].iter() {
                if !voronoi.bounding_box().contains(p) {
                    println!("Segment {index}: endpoint {:?} is outside bounding box.", p);
                    fail(&voronoi);
                }

                let (da, db) = (distance(p, a), distance(p, b));
                if (da - db).abs() > tolerance {
                    println!("Segment {index}: endpoint {:?} is not equidistant to its sites ({da} vs {db}).", p);
                    fail(&voronoi);
                }
            }
        }
    }

    println!("All diagrams are valid");
}

fn distance(a: &Point, b: &Point) -> f64 {
    ((a.x - b.x).powi(2) + (a.y - b.y).powi(2)).sqrt()
}

fn fail(voronoi: &Voronoi) {
    println!("Found invalid. Printed to file...");
    let sites: Vec<[f64; 2]> = voronoi.sites().iter().map(|p| [p.x, p.y]).collect();
    let s = serde_json::to_string(&sites).expect("Sites are serializable");
    std::fs::write("sites.json", s).expect("Could not write sites.json");
    exit(-1);
}
