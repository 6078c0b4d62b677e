use modus::{Mode, Performance, Scale};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    if let Some(flag) = args.next() {
        if flag == "--render" {
            let path = args.next().ok_or("--render needs an output path")?;
            let root = args.next().unwrap_or_else(|| "C".into());
            let mode = Mode::from_name(&args.next().unwrap_or_default());
            let octave: i32 = args.next().map(|s| s.parse()).transpose()?.unwrap_or(4);

            let scale = Scale::build(&root, mode, octave)?;
            let performance = Performance::new(&scale, 0.6);
            modus::render_performance(&performance, &path, 44100)?;
            println!("Wrote {}", path);
            return Ok(());
        }
        return Err(format!("Unknown argument: {}", flag).into());
    }

    modus::tui::run()
}
