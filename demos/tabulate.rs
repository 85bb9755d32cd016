// Copyright 2017-2018 Peter Williams <peter@newton.cx> and collaborators
// Licensed under the GPL version 3.

/// Tabulate one of the iterative functions over a grid of its last argument.
///
/// Diagnostics from the routines (non-convergence in particular) go to the
/// terminal through slog; the table itself goes to standard output.

extern crate clap;
extern crate moremath;
extern crate moremath_test_support;
#[macro_use] extern crate slog;

use moremath::Monitored;
use std::process;


fn main() {
    let matches = clap::Command::new("tabulate")
        .version(clap::crate_version!())
        .about("Tabulate a special function over a linear or logarithmic grid")
        .arg(clap::Arg::new("FUNCTION")
             .help("One of exp_rel_n, gamma_star, kummer, carlson_rf, carlson_rd, bessel_knu")
             .required(true)
             .index(1))
        .arg(clap::Arg::new("LOW")
             .help("The first grid point")
             .required(true)
             .allow_negative_numbers(true)
             .value_parser(clap::value_parser!(f64))
             .index(2))
        .arg(clap::Arg::new("HIGH")
             .help("The last grid point")
             .required(true)
             .allow_negative_numbers(true)
             .value_parser(clap::value_parser!(f64))
             .index(3))
        .arg(clap::Arg::new("n")
             .short('n')
             .long("points")
             .help("The number of grid points")
             .default_value("20")
             .value_parser(clap::value_parser!(usize)))
        .arg(clap::Arg::new("log")
             .long("log")
             .help("Space the grid points logarithmically")
             .action(clap::ArgAction::SetTrue))
        .arg(clap::Arg::new("param")
             .short('p')
             .long("param")
             .help("A fixed leading argument; repeat as needed")
             .allow_negative_numbers(true)
             .value_parser(clap::value_parser!(f64))
             .action(clap::ArgAction::Append))
        .get_matches();

    let function = matches.get_one::<String>("FUNCTION").unwrap().clone();
    let low = *matches.get_one::<f64>("LOW").unwrap();
    let high = *matches.get_one::<f64>("HIGH").unwrap();
    let n = *matches.get_one::<usize>("n").unwrap();
    let is_log = matches.get_flag("log");
    let params: Vec<f64> = matches.get_many::<f64>("param")
        .map(|v| v.cloned().collect())
        .unwrap_or_default();

    if is_log && !(low > 0. && high > 0.) {
        eprintln!("error: logarithmic grids need positive limits");
        process::exit(1);
    }

    let needed = match function.as_str() {
        "exp_rel_n" | "gamma_star" | "bessel_knu" => 1,
        "kummer" | "carlson_rf" | "carlson_rd" => 2,
        other => {
            eprintln!("error: unsupported function \"{}\"", other);
            process::exit(1);
        }
    };

    if params.len() != needed {
        eprintln!("error: {} needs {} fixed parameter(s), got {}", function, needed, params.len());
        process::exit(1);
    }

    let log = moremath_test_support::default_log();
    info!(log, "tabulating"; "function" => &function, "low" => low, "high" => high,
          "n" => n, "log" => is_log);

    let m = Monitored::new(&log);

    for i in 0..n {
        let frac = if n > 1 { i as f64 / (n - 1) as f64 } else { 0. };
        let x = if is_log {
            (low.ln() + frac * (high.ln() - low.ln())).exp()
        } else {
            low + frac * (high - low)
        };

        let v = match function.as_str() {
            "exp_rel_n" => m.exp_rel_n(x, params[0] as u16),
            "gamma_star" => m.gamma_star(params[0], x),
            "bessel_knu" => m.bessel_knu(params[0], x),
            "kummer" => m.kummer(params[0] as u16, params[1] as u16, x),
            "carlson_rf" => m.carlson_rf(params[0], params[1], x),
            _ => m.carlson_rd(params[0], params[1], x),
        };

        println!("{:.16e}\t{:.16e}", x, v);
    }
}
