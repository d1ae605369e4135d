use clap::Parser;
use dice_tally::{
    Explode, MarkdownStringifier, Options, Roll, RollContext, SimpleStringifier, Threshold,
};
use rand::{rngs::StdRng, SeedableRng};
use std::io::{self, BufRead, Write};
use std::process::ExitCode;

/// Roll dice expressions such as `2d6 + 1d20 - 3` or `4d6dl1`.
#[derive(Parser)]
#[command(name = "dice-tally", version)]
struct Cli {
    /// Expression to roll; read one per line from stdin when omitted
    #[arg(allow_hyphen_values = true)]
    expr: Vec<String>,
    /// Drop this many more of the lowest values from every dice term
    #[arg(long, value_name = "N")]
    drop_lowest: Option<usize>,
    /// Drop this many of the highest values from every dice term
    #[arg(long, value_name = "N")]
    drop_highest: Option<usize>,
    /// Reroll, once, every value at or below X
    #[arg(long, value_name = "X")]
    reroll: Option<u32>,
    /// Roll an extra die for every value reaching `max` or N
    #[arg(long, value_name = "max|N")]
    explode: Option<Threshold>,
    /// Longest explosion chain per die; 0 for none
    #[arg(long, value_name = "N", default_value_t = 0, requires = "explode")]
    explode_cap: usize,
    /// Roll single dice with this many sides several times and keep the best
    #[arg(long, value_name = "SIDES")]
    advantage: Option<u32>,
    /// Roll single dice with this many sides several times and keep the worst
    #[arg(long, value_name = "SIDES")]
    disadvantage: Option<u32>,
    /// Samples drawn for advantage or disadvantage
    #[arg(long, value_name = "N", default_value_t = 2)]
    times: usize,
    /// RNG seed for repeatable rolls
    #[arg(long)]
    seed: Option<u64>,
    /// Render for chat: struck-through drops, total in code
    #[arg(long)]
    markdown: bool,
    /// Fail any expression that draws more than N dice
    #[arg(long, value_name = "N")]
    max_rolls: Option<usize>,
}

impl Cli {
    fn options(&self) -> Options {
        let mut options = Options::new();
        options.drop_lowest = self.drop_lowest;
        options.drop_highest = self.drop_highest;
        if let Some(lte) = self.reroll {
            options = options.reroll(lte);
        }
        if let Some(threshold) = self.explode {
            options = options.explode(Explode::new(threshold).cap(self.explode_cap));
        }
        if let Some(sides) = self.advantage {
            options = options.advantage(sides, self.times);
        }
        if let Some(sides) = self.disadvantage {
            options = options.disadvantage(sides, self.times);
        }
        options
    }

    fn render(&self, roll: &Roll) -> String {
        if self.markdown {
            MarkdownStringifier::new().stringify(roll)
        } else {
            SimpleStringifier::new().stringify(roll)
        }
    }
}

fn repl(cli: &Cli, options: &Options, ctx: &mut RollContext<StdRng>) -> io::Result<()> {
    print!("> ");
    io::stdout().flush()?;
    for line in io::stdin().lock().lines() {
        let line = line?;
        if !line.trim().is_empty() {
            match ctx.roll_str(&line, options) {
                Ok(r) => println!("{}", cli.render(&r)),
                Err(why) => eprintln!("error: {}", why),
            }
        }
        print!("> ");
        io::stdout().flush()?;
    }
    println!();
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let options = cli.options();
    if let Err(why) = options.validate() {
        eprintln!("error: {}", why);
        return ExitCode::FAILURE;
    }

    let rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let mut ctx = RollContext::new(cli.max_rolls, rng);

    if cli.expr.is_empty() {
        return match repl(&cli, &options, &mut ctx) {
            Ok(()) => ExitCode::SUCCESS,
            Err(why) => {
                eprintln!("error: {}", why);
                ExitCode::FAILURE
            }
        };
    }

    match ctx.roll_str(&cli.expr.join(" "), &options) {
        Ok(r) => {
            println!("{}", cli.render(&r));
            ExitCode::SUCCESS
        }
        Err(why) => {
            eprintln!("error: {}", why);
            ExitCode::FAILURE
        }
    }
}
