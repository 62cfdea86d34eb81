use actionset::{ActionError, ActionType, MaskWord, Options, ParseDetails};
use bitflags::Flags;
use std::fmt::Debug;

mod ansi {
    pub const RESET: &str = "\x1b[0m";
    pub const DIM: &str = "\x1b[2m";
    pub const BOLD: &str = "\x1b[1m";

    pub const RED: &str = "\x1b[31m";
    pub const GREEN: &str = "\x1b[32m";
    pub const YELLOW: &str = "\x1b[33m";
    pub const BLUE: &str = "\x1b[34m";
    pub const CYAN: &str = "\x1b[36m";
    pub const GRAY: &str = "\x1b[90m";

    pub struct Palette {
        enabled: bool,
    }

    impl Palette {
        pub fn new(enabled: bool) -> Self {
            Self { enabled }
        }

        pub fn paint(&self, s: impl AsRef<str>, color: &str) -> String {
            if self.enabled { format!("{}{}{}", color, s.as_ref(), RESET) } else { s.as_ref().to_string() }
        }

        pub fn bold(&self, s: impl AsRef<str>) -> String {
            if self.enabled { format!("{}{}{}", BOLD, s.as_ref(), RESET) } else { s.as_ref().to_string() }
        }

        pub fn dim(&self, s: impl AsRef<str>) -> String {
            if self.enabled { format!("{}{}{}", DIM, s.as_ref(), RESET) } else { s.as_ref().to_string() }
        }
    }
}

/// Print the scan trace and every encoding of `input`. Returns whether the
/// input was accepted.
pub fn print_run<A: ActionType>(input: &str, options: &Options, color: bool) -> bool {
    let palette = ansi::Palette::new(color);
    println!("\n{}", palette.bold(palette.paint(format!("⚙  Parsing: \"{}\"", input), ansi::CYAN)));

    let details = match actionset::parse_verbose::<A>(input) {
        Ok(details) => details,
        Err(err) => {
            println!("\n{}", palette.paint("━━━ Error ━━━", ansi::GRAY));
            print_error(input, &err, &palette);
            println!();
            return false;
        }
    };

    println!("\n{}", palette.paint("━━━ Matches ━━━", ansi::GRAY));
    print_matches(&details, &palette);

    println!("\n{}", palette.paint("━━━ Encodings ━━━", ansi::GRAY));
    println!("  {} {}", palette.paint("canonical:", ansi::BLUE), palette.bold(format!("\"{}\"", details.canonical)));
    println!("  {} {}", palette.paint("set:      ", ansi::BLUE), palette.dim(format!("{:?}", details.set)));
    print_mask("u32:      ", actionset::parse_to_u32_with::<A>(input, options), &palette);
    print_mask("u64:      ", actionset::parse_to_u64_with::<A>(input, options), &palette);

    println!("\n{}", palette.paint("━━━ Timing ━━━", ansi::GRAY));
    println!("  Scan: {}", palette.paint(format!("{:?}", details.elapsed), ansi::GREEN));
    println!();
    true
}

/// Print the `bitflags` view of `input`.
pub fn print_flags<A, F>(input: &str, color: bool)
where
    A: ActionType,
    F: Flags + Debug,
    F::Bits: MaskWord,
{
    let palette = ansi::Palette::new(color);
    let rendered = match actionset::parse_to_flags::<A, F>(input) {
        Ok(flags) => palette.dim(format!("{flags:?}")),
        Err(err) => palette.paint(err.to_string(), ansi::RED),
    };
    println!("  {} {}", palette.paint("flags:    ", ansi::BLUE), rendered);
    println!();
}

fn print_matches<A: ActionType>(details: &ParseDetails<A>, palette: &ansi::Palette) {
    if details.matches.is_empty() {
        println!("{}", palette.dim("  No actions (empty action string)"));
        return;
    }
    for (idx, m) in details.matches.iter().enumerate() {
        let ordinal = match m.ordinal {
            Some(ordinal) => format!("ordinal {ordinal}"),
            None => "all actions".to_string(),
        };
        println!(
            "  {} {} {} {} {}",
            palette.paint(format!("[{}]", idx), ansi::GRAY),
            palette.bold(palette.paint(m.action, ansi::GREEN)),
            palette.dim("│"),
            palette.paint(format!("span {}..{}", m.span.start, m.span.end), ansi::YELLOW),
            palette.dim(format!("│ {ordinal}")),
        );
    }
    if details.empty_segments > 0 {
        println!("  {}", palette.dim(format!("skipped {} empty segment(s)", details.empty_segments)));
    }
}

fn print_mask<W: MaskWord + std::fmt::Binary>(label: &str, mask: actionset::Result<W>, palette: &ansi::Palette) {
    let rendered = match mask {
        Ok(mask) => palette.paint(format!("{mask:#b}"), ansi::YELLOW),
        Err(err) => palette.dim(err.to_string()),
    };
    println!("  {} {}", palette.paint(label, ansi::BLUE), rendered);
}

fn print_error(input: &str, err: &ActionError, palette: &ansi::Palette) {
    println!("  {}", palette.paint(err.to_string(), ansi::RED));

    let (index, width) = match err {
        ActionError::UnexpectedCharacter { index, .. } => (*index, 1),
        ActionError::InvalidAction { action, index, .. } => (*index, action.chars().count().max(1)),
        _ => return,
    };

    let column = input.get(..index).map_or(index, |prefix| prefix.chars().count());
    println!("\n    {}", input);
    println!("    {}{}", " ".repeat(column), palette.paint("^".repeat(width), ansi::YELLOW));
}
