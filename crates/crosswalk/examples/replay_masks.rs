//! Replay precomputed detector masks through the accumulator.
//!
//! The config names two directories of per-frame PNG masks (sorted by file
//! name). A missing crosswalk file for a frame means "no crosswalk detected".
//!
//!   cargo run -p crosswalk --features image --example replay_masks -- config.json

use std::{
    cell::Cell,
    env, fs,
    path::{Path, PathBuf},
};

use crosswalk::convert::{binary_mask, mask_to_gray};
use crosswalk::core::{init_with_level, FrameView, Mask};
use crosswalk::{
    CrosswalkAccumulator, CrosswalkConfig, CrosswalkReport, CrosswalkVehicleDetector, Detection,
};
use image::ImageReader;
use log::LevelFilter;

struct ReplayDetector {
    crosswalks: Vec<Option<Mask>>,
    vehicles: Vec<Mask>,
    empty: Mask,
    next: Cell<usize>,
}

impl CrosswalkVehicleDetector for ReplayDetector {
    fn detect(&self, _frame: &FrameView<'_>) -> Detection {
        let i = self.next.get();
        self.next.set(i + 1);
        Detection {
            crosswalk: self.crosswalks.get(i).cloned().flatten(),
            vehicle: self.vehicles.get(i).unwrap_or(&self.empty).clone(),
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_with_level(LevelFilter::Debug)?;

    let Some(config_path) = env::args().nth(1) else {
        eprintln!("Usage: replay_masks <config.json>");
        return Ok(());
    };
    let cfg = CrosswalkConfig::load_json(&config_path)?;
    let params = cfg.build_params();

    let vehicle_dir = cfg.vehicle_dir.as_deref().ok_or("config needs vehicle_dir")?;
    let vehicle_paths = sorted_pngs(Path::new(vehicle_dir))?;
    if vehicle_paths.is_empty() {
        return Err(format!("no vehicle masks in {vehicle_dir}").into());
    }
    let vehicles = vehicle_paths
        .iter()
        .map(|p| load_mask(p))
        .collect::<Result<Vec<_>, _>>()?;

    let crosswalks = match cfg.crosswalk_dir.as_deref() {
        Some(dir) => vehicle_paths
            .iter()
            .map(|p| {
                let path = Path::new(dir).join(p.file_name().unwrap_or_default());
                path.exists().then(|| load_mask(&path)).transpose()
            })
            .collect::<Result<Vec<_>, _>>()?,
        None => vec![None; vehicles.len()],
    };

    let (w, h) = (vehicles[0].width(), vehicles[0].height());
    let detector = ReplayDetector {
        crosswalks,
        vehicles,
        empty: Mask::zeros(w, h)?,
        next: Cell::new(0),
    };
    let frame_data = vec![0u8; w * h];
    let frame = FrameView::gray(w, h, &frame_data)?;

    let mut acc = CrosswalkAccumulator::new(&detector, &params);
    let mut report = CrosswalkReport::new(params);
    for _ in 0..vehicle_paths.len() {
        match acc.process_frame(&frame) {
            Ok(verdict) => report.push(verdict),
            Err(err) => {
                report.set_error(err);
                break;
            }
        }
    }

    if let (Some(path), Some(stable)) = (cfg.stable_mask_path.as_ref(), acc.stable_mask()) {
        mask_to_gray(&stable).save(path)?;
        println!("wrote stable crosswalk mask to {path}");
    }

    let output_path = cfg.output_path();
    report.write_json(&output_path)?;
    println!(
        "wrote report JSON to {} ({} overlap frame(s))",
        output_path.display(),
        report.overlap_frames().len()
    );
    Ok(())
}

fn sorted_pngs(dir: &Path) -> std::io::Result<Vec<PathBuf>> {
    let mut paths: Vec<PathBuf> = fs::read_dir(dir)?
        .filter_map(|e| e.ok().map(|e| e.path()))
        .filter(|p| p.extension().is_some_and(|ext| ext == "png"))
        .collect();
    paths.sort();
    Ok(paths)
}

fn load_mask(path: &Path) -> Result<Mask, Box<dyn std::error::Error>> {
    let img = ImageReader::open(path)?.decode()?.to_luma8();
    Ok(binary_mask(&img)?)
}
