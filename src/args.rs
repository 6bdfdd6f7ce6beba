use clap::Parser;
use once_cell::sync::Lazy;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
/// Ambient dot grid that springs away from the mouse cursor
pub struct Args {
    /// Initial window size, as width,height
    #[arg(long, default_value = "1280,800", value_parser = parse_window_size)]
    pub win: (u32, u32),
    /// Seed for the per-dot random values (random if omitted)
    #[arg(long)]
    pub seed: Option<u64>,
    /// Keep the original dot grid when the window is resized instead of laying out a new one.
    #[arg(long)]
    pub keep_grid_on_resize: bool,
}

pub static ARGS: Lazy<Args> = Lazy::new(Args::parse);

fn parse_window_size(s: &str) -> Result<(u32, u32), String> {
    let (w, h) = s
        .split_once(',')
        .ok_or_else(|| format!("expected width,height but got '{s}'"))?;
    let w: u32 = w.trim().parse().map_err(|e| format!("bad width '{w}': {e}"))?;
    let h: u32 = h.trim().parse().map_err(|e| format!("bad height '{h}': {e}"))?;
    if w == 0 || h == 0 {
        return Err(format!("window size must be non-zero, got {w}x{h}"));
    }
    Ok((w, h))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_window_size() {
        assert_eq!(parse_window_size("1280,800"), Ok((1280, 800)));
        assert_eq!(parse_window_size(" 640 , 480 "), Ok((640, 480)));
        assert!(parse_window_size("1280x800").is_err());
        assert!(parse_window_size("wide,800").is_err());
        assert!(parse_window_size("0,800").is_err());
    }

    #[test]
    fn test_args_defaults() {
        let args = Args::parse_from(["dot-field"]);
        assert_eq!(args.win, (1280, 800));
        assert_eq!(args.seed, None);
        assert!(!args.keep_grid_on_resize);

        let args = Args::parse_from(["dot-field", "--win", "300,200", "--seed", "9", "--keep-grid-on-resize"]);
        assert_eq!(args.win, (300, 200));
        assert_eq!(args.seed, Some(9));
        assert!(args.keep_grid_on_resize);
    }
}
