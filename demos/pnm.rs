//! Walk through canvas transforms and drawing primitives, saving every step
#![deny(warnings)]

use pnmdraw::*;
use std::{
    env,
    fs,
    path::{Path, PathBuf},
};
use tracing_subscriber::{fmt::format::FmtSpan, EnvFilter};

type Error = Box<dyn std::error::Error>;

#[derive(Debug)]
struct Args {
    inputs: Vec<PathBuf>,
    output_dir: PathBuf,
    options: RasterOptions,
    color: Rgb,
}

impl Args {
    fn parse() -> Result<Args, Error> {
        let mut result = Args {
            inputs: Vec::new(),
            output_dir: PathBuf::from("."),
            options: RasterOptions::default(),
            color: Rgb::WHITE,
        };
        let mut args = env::args();
        let cmd = args.next().unwrap_or_else(|| "pnm".to_owned());
        while let Some(arg) = args.next() {
            match arg.as_ref() {
                "-h" => {
                    Self::usage(&cmd);
                    std::process::exit(0);
                }
                "-o" => {
                    result.output_dir = args.next().ok_or("-o requires argument")?.into();
                }
                "-c" => {
                    let path = args.next().ok_or("-c requires argument")?;
                    result.options = RasterOptions::from_json(&fs::read_to_string(path)?)?;
                }
                "-x" => {
                    result.options = RasterOptions::corrected();
                }
                "-fg" => {
                    result.color = args
                        .next()
                        .ok_or("-fg requires color #rrggbb argument")?
                        .parse()?;
                }
                _ => result.inputs.push(arg.into()),
            }
        }
        Ok(result)
    }

    fn usage(cmd: &str) {
        eprintln!("Walk through canvas transforms and drawing primitives, saving every step");
        eprintln!("\nUSAGE:");
        eprintln!(
            "    {} [-o <dir>] [-c <options.json>] [-x] [-fg <color>] [<image.{{pbm,pgm,ppm}}>...]",
            cmd
        );
        eprintln!("\nARGS:");
        eprintln!("    -o <dir>           output directory (default: .)");
        eprintln!("    -c <options.json>  drawing options");
        eprintln!("    -x                 use corrected fill and fractal algorithms");
        eprintln!("    -fg <color>        drawing color (default: #ffffff)");
        eprintln!("    <image>            image to load, transform and save");
    }
}

/// Load image, apply every transform in turn and save intermediate results
fn transform<P: Pixel>(input: &Path, output_dir: &Path) -> Result<(), Error> {
    let stem = input
        .file_stem()
        .and_then(|stem| stem.to_str())
        .ok_or("input file has no name")?;
    let ext = input
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or("pnm");
    let output = |step: &str| output_dir.join(format!("{stem}-{step}.{ext}"));

    let mut canvas = Canvas::<P>::load(input)?;
    let (width, height) = canvas.size();
    tracing::info!("[transform] {} {}x{}", input.display(), width, height);
    if let Ok(pixel) = canvas.get(0, 0) {
        tracing::info!("[transform] pixel at (0, 0): {:?}", pixel);
    }
    canvas.save(output("saved"))?;

    canvas.invert();
    canvas.save(output("inverted"))?;
    canvas.flip();
    canvas.save(output("flipped"))?;
    canvas.flop();
    canvas.save(output("flopped"))?;
    canvas.rotate_90_cw();
    canvas.save(output("rotated"))?;
    Ok(())
}

const POLYGON: [Point; 4] = [
    Point::new(20, 80),
    Point::new(80, 80),
    Point::new(50, 20),
    Point::new(30, 40),
];

type Scene = fn(&mut Pixmap, Rgb);

const SCENES: [(&str, Scene); 10] = [
    ("line", |c, _| c.draw_line((0, 50), (99, 50), Rgb::RED)),
    ("rectangle", |c, fg| c.draw_rectangle((20, 30), 60, 40, fg)),
    ("filled-rectangle", |c, fg| {
        c.draw_filled_rectangle((20, 30), 60, 40, fg)
    }),
    ("circle", |c, fg| c.draw_circle((50, 50), 20, fg)),
    ("filled-circle", |c, fg| c.draw_filled_circle((50, 50), 20, fg)),
    ("triangle", |c, fg| {
        c.draw_triangle((20, 80), (80, 80), (50, 20), fg)
    }),
    ("filled-triangle", |c, fg| {
        c.draw_filled_triangle((20, 80), (80, 80), (50, 20), fg)
    }),
    ("polygon", |c, fg| c.draw_polygon(&POLYGON, fg)),
    ("filled-polygon", |c, fg| c.draw_filled_polygon(&POLYGON, fg)),
    ("sierpinski", |c, _| {
        c.draw_sierpinski_triangle(4, (25, 75), 50, Rgb::RED)
    }),
];

/// Draw every primitive and fractal on its own canvas
fn draw(output_dir: &Path, options: RasterOptions, color: Rgb) -> Result<(), Error> {
    for (name, scene) in SCENES {
        let mut image = Pixmap::new(100, 100).with_options(options);
        tracing::debug_span!("[draw]", name).in_scope(|| scene(&mut image, color));
        image.save(output_dir.join(format!("{name}.ppm")))?;
    }

    let mut image = Pixmap::new(400, 400).with_options(options);
    image.draw_koch_snowflake(3, (50, 350), 300, color);
    image.save(output_dir.join("koch-snowflake.ppm"))?;
    Ok(())
}

fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .with_span_events(FmtSpan::CLOSE)
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse()?;
    tracing::debug!("[args] {:?}", args);
    fs::create_dir_all(&args.output_dir)?;

    for input in args.inputs.iter() {
        match input.extension().and_then(|ext| ext.to_str()) {
            Some("pbm") => transform::<Bit>(input, &args.output_dir)?,
            Some("pgm") => transform::<Gray>(input, &args.output_dir)?,
            _ => transform::<Rgb>(input, &args.output_dir)?,
        }
    }
    draw(&args.output_dir, args.options, args.color)
}
