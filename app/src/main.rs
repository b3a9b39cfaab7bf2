
use std::env;
use std::fs::{create_dir_all, File};
use std::io::{stdout, Read, Write};
use std::path::{Path, PathBuf};
use std::process::exit;

use failure::Fail;
use indicatif::{ProgressBar, ProgressStyle};
use log::info;

use gif_animation::{decode, encode, DecodeOptions, DisposalMethod, EncodeOptions, PaletteLookup, Rgb};

mod errors;

use crate::errors::{AppError, AppResult};



const DEFAULT_DELAY: u16 = 10;


#[derive(Clone, Debug, Eq, PartialEq)]
struct Entry {
    delay: u16,
    filepath: String,
}

#[derive(Clone, Debug, Eq, PartialEq)]
enum Command {
    Create { entries: Vec<Entry>, options: EncodeOptions },
    Extract { filepath: String },
    Info { filepath: String },
}

#[derive(Clone, Debug, Eq, PartialEq)]
struct Parsed {
    command: Command,
    output: Option<String>,
}


fn main() {
    env_logger::init();

    if let Err(err) = app() {
        let mut fail: &dyn Fail = &err;
        let mut message = err.to_string();
        while let Some(cause) = fail.cause() {
            message.push_str(&format!("\n\tcaused by: {}", cause));
            fail = cause;
        }
        eprintln!("{}\n", message);
        print_usage();
        exit(1);
    }
}

fn print_usage() {
    eprintln!("{}", include_str!("usage.txt"));
}

fn app() -> AppResult<()> {
    let parsed = parse_args()?;

    match parsed.command {
        Command::Create { entries, options } => {
            let gif = create(&entries, &options)?;
            match parsed.output {
                Some(output) => File::create(output)?.write_all(&gif)?,
                None => stdout().lock().write_all(&gif)?,
            }
        },
        Command::Extract { filepath } => {
            let directory = parsed.output.unwrap_or_else(|| ".".to_owned());
            extract(&filepath, Path::new(&directory))?;
        },
        Command::Info { filepath } => print_info(&filepath)?,
    }

    Ok(())
}


fn create(entries: &[Entry], options: &EncodeOptions) -> AppResult<Vec<u8>> {
    if entries.is_empty() {
        return Err(AppError::NotEnoughArgument);
    }

    let progress_bar = ProgressBar::new(entries.len() as u64);
    progress_bar.set_style(
        ProgressStyle::default_bar()
            .template("[{bar:60.cyan/blue}] {pos:>4}/{len:4} files loaded | {msg}")
            .progress_chars("█▌ ")
    );

    let mut frames = vec![];
    for entry in entries {
        progress_bar.set_message(&entry.filepath);
        frames.push(load_file(&entry.filepath)?);
        progress_bar.inc(1);
    }
    progress_bar.finish_and_clear();

    let delays: Vec<u16> = entries.iter().map(|it| it.delay).collect();
    let gif = encode(&frames, &delays, options)?;
    info!("Created {} frames, {} bytes", frames.len(), gif.len());
    Ok(gif)
}

fn extract(filepath: &str, directory: &Path) -> AppResult<()> {
    let animation = decode(&load_file(filepath)?, &DecodeOptions::default())?;
    create_dir_all(directory)?;

    for frame in &animation.frames {
        let path: PathBuf = directory.join(format!("frame-{:04}.gif", frame.index));
        File::create(&path)?.write_all(&frame.standalone_gif(&animation.header))?;
        println!("{}\t{}", path.display(), frame.delay);
    }

    Ok(())
}

fn print_info(filepath: &str) -> AppResult<()> {
    let animation = decode(&load_file(filepath)?, &DecodeOptions::default())?;

    println!("canvas: {}x{}", animation.canvas_width, animation.canvas_height);
    match animation.loop_count {
        Some(0) => println!("loop: infinite"),
        Some(count) => println!("loop: {}", count),
        None => println!("loop: none"),
    }
    println!("duration: {}cs", animation.total_duration());
    for frame in &animation.frames {
        println!(
            "#{}\t{}x{}+{}+{}\tdelay={}\tdisposal={:?}\tlocal_palette={}",
            frame.index,
            frame.width,
            frame.height,
            frame.left,
            frame.top,
            frame.delay,
            frame.disposal_method(),
            frame.local_color_table);
    }

    Ok(())
}

fn load_file(filepath: &str) -> AppResult<Vec<u8>> {
    let mut file = File::open(filepath)?;
    let mut buffer = vec![];
    file.read_to_end(&mut buffer)?;
    Ok(buffer)
}


fn parse_args() -> AppResult<Parsed> {
    let mut args = env::args().skip(1);
    let command = args.next().ok_or(AppError::NotEnoughArgument)?;

    let mut output = None;
    let mut options = EncodeOptions::default();
    let mut delay = DEFAULT_DELAY;
    let mut files = vec![];

    #[allow(clippy::while_let_on_iterator)]
    while let Some(arg) = args.next() {
        let mut next = || args.next().ok_or(AppError::NotEnoughArgument);

        match &*arg {
            "-h" | "--help" => {
                print_usage();
                exit(0);
            },
            "-d" | "--delay" =>
                delay = next()?.parse()?,
            "-p" | "--loop" =>
                options.loop_count = next()?.parse()?,
            "--disposal" =>
                options.disposal = DisposalMethod::from_u8(next()?.parse()?),
            "--transparent" =>
                options.transparent_color = Some(parse_color(&next()?)?),
            "--current-palette" =>
                options.palette_lookup = PaletteLookup::CurrentFrame,
            "-o" | "--output" =>
                output = Some(next()?),
            filepath =>
                files.push(Entry { delay, filepath: filepath.to_owned() }),
        }
    }

    let single = |files: Vec<Entry>| {
        files.into_iter().next().map(|it| it.filepath).ok_or(AppError::NotEnoughArgument)
    };

    let command = match &*command {
        "create" => Command::Create { entries: files, options },
        "extract" => Command::Extract { filepath: single(files)? },
        "info" => Command::Info { filepath: single(files)? },
        "-h" | "--help" => {
            print_usage();
            exit(0);
        },
        _ => return Err(AppError::UnknownCommand(command.clone())),
    };

    Ok(Parsed { command, output })
}


fn parse_color(s: &str) -> AppResult<Rgb> {
    let parts = s.split(',').map(|it| it.trim().parse()).collect::<Result<Vec<u8>, _>>()?;
    match parts.as_slice() {
        [red, green, blue] => Ok(Rgb::new(*red, *green, *blue)),
        _ => Err(AppError::InvalidColor(s.to_owned())),
    }
}
