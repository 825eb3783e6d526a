use anyhow::Context;
use clap::Parser;
use glam::vec3;
use hitcore::{
    Hittable, MaterialHandle, Primitive, PrimitiveList, Ray, Sphere, Tolerances, Triangle,
};
use log::info;
use rand::prelude::*;
use rayon::prelude::*;
use std::{
    path::PathBuf,
    sync::atomic::{AtomicU64, Ordering},
    time::Instant,
};

type DefaultRng = rand_xoshiro::Xoshiro256Plus;

const T_MIN: f32 = 0.0001;
const T_MAX: f32 = 10_000_000.0;

/// Shoot a grid of rays at a built-in scene and report coverage and throughput
#[derive(Debug, Parser)]
#[command(name = "probe")]
struct Args {
    /// TOML file overriding the intersection tolerances
    #[arg(long)]
    tolerances: Option<PathBuf>,

    #[arg(long, default_value_t = 640)]
    width: u32,

    #[arg(long, default_value_t = 360)]
    height: u32,

    /// Jittered rays per grid cell
    #[arg(long, default_value_t = 16)]
    samples: u32,

    #[arg(long, default_value_t = 0)]
    seed: u64,
}

// Generate a semi random scene of spheres standing on a large ground sphere, plus a few triangles
fn scene(rng: &mut DefaultRng) -> anyhow::Result<PrimitiveList> {
    let mut list = PrimitiveList::default();
    let mut material = 0;
    let mut next_material = || {
        material += 1;
        MaterialHandle(material)
    };

    list.push(Sphere::new(vec3(0.0, -1000.0, 0.0), 1000.0, MaterialHandle(0))?);

    for a in -6..6 {
        for b in -6..6 {
            let center = vec3(
                a as f32 + 0.9 * rng.gen::<f32>(),
                0.2,
                b as f32 + 0.9 * rng.gen::<f32>(),
            );
            list.push(Sphere::new(center, 0.2, next_material())?);
        }
    }

    // Tilted panels, so they are visible from above
    list.push(Triangle::new(
        vec3(-4.0, 0.1, -1.0),
        vec3(-2.0, 0.1, -1.0),
        vec3(-3.0, 1.5, -3.0),
        next_material(),
    )?);
    list.push(Triangle::new(
        vec3(2.0, 0.1, 1.0),
        vec3(4.0, 0.1, 1.0),
        vec3(3.0, 1.5, 3.0),
        next_material(),
    )?);

    Ok(list)
}

#[derive(Debug, Default)]
struct Stats {
    rays: AtomicU64,
    hits: AtomicU64,
    spheres: AtomicU64,
    triangles: AtomicU64,
}

fn probe(list: &PrimitiveList, args: &Args, tolerances: &Tolerances) -> Stats {
    let stats = Stats::default();
    // Orthographic view from above, cropped to the interesting part of the scene
    let (lo, hi) = (-7.0, 7.0);
    let height = list.bounds().map_or(1.0, |b| b.max().y + 1.0);
    let direction = vec3(0.0, -1.0, 0.0);

    let triangle_materials: Vec<MaterialHandle> = list
        .iter()
        .filter(|p| matches!(p, Primitive::Triangle(_)))
        .map(|p| p.material())
        .collect();

    (0..args.height).into_par_iter().for_each(|y| {
        let mut rng = DefaultRng::seed_from_u64(args.seed ^ u64::from(y));
        let (mut rays, mut hits, mut spheres, mut triangles) = (0, 0, 0, 0);

        for x in 0..args.width {
            for _ in 0..args.samples {
                let u = (rng.gen::<f32>() + x as f32) / args.width as f32;
                let v = (rng.gen::<f32>() + y as f32) / args.height as f32;
                let origin = vec3(lo + u * (hi - lo), height, lo + v * (hi - lo));

                rays += 1;
                if let Some(hit) =
                    list.closest_hit_with(Ray::new(origin, direction), T_MIN, T_MAX, tolerances)
                {
                    hits += 1;
                    if triangle_materials.contains(&hit.material) {
                        triangles += 1;
                    } else {
                        spheres += 1;
                    }
                }
            }
        }

        stats.rays.fetch_add(rays, Ordering::Relaxed);
        stats.hits.fetch_add(hits, Ordering::Relaxed);
        stats.spheres.fetch_add(spheres, Ordering::Relaxed);
        stats.triangles.fetch_add(triangles, Ordering::Relaxed);
    });

    stats
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let tolerances = match &args.tolerances {
        Some(path) => Tolerances::load(path)
            .with_context(|| format!("Failed to load tolerances from {}", path.display()))?,
        None => Tolerances::default(),
    };

    let mut rng = DefaultRng::seed_from_u64(args.seed);
    let list = scene(&mut rng).context("Failed to build the probe scene")?;
    info!("Built {} primitives", list.len());

    let start = Instant::now();
    let stats = probe(&list, &args, &tolerances);
    let duration = start.elapsed();

    let rays = stats.rays.load(Ordering::Relaxed);
    let hits = stats.hits.load(Ordering::Relaxed);
    let rays_per_second = rays as f64 / 1_000_000.0 / duration.as_secs_f64();
    info!(
        "Time elapsed: {:.2?}, total rays: {}, rays per second: {:.2}M",
        duration, rays, rays_per_second
    );
    info!(
        "Coverage: {:.1}% ({} sphere hits, {} triangle hits)",
        100.0 * hits as f64 / rays.max(1) as f64,
        stats.spheres.load(Ordering::Relaxed),
        stats.triangles.load(Ordering::Relaxed),
    );

    Ok(())
}
