// Copyright 2017-2018 Peter Williams <peter@newton.cx> and collaborators
// Licensed under the GPL version 3.

/// Evaluate one special function call given on the command line, e.g.
/// `eval 'gamma_star(2.5, 1.3)'`.

extern crate clap;
extern crate moremath;
extern crate regex;

use regex::Regex;
use std::process;


fn evaluate(name: &str, a: &[f64]) -> Result<f64, String> {
    let want = |n: usize| -> Result<(), String> {
        if a.len() == n {
            Ok(())
        } else {
            Err(format!("{} takes {} argument(s), got {}", name, n, a.len()))
        }
    };

    let order = |x: f64| -> Result<u16, String> {
        if x >= 0. && x <= u16::max_value() as f64 && x == x.round() {
            Ok(x as u16)
        } else {
            Err(format!("{} is not a valid order", x))
        }
    };

    Ok(match name {
        "exp_n" => { want(2)?; moremath::exp_n(a[0], order(a[1])?) },
        "exprel" => { want(1)?; moremath::exprel(a[0]) },
        "exp_rel_n" => { want(2)?; moremath::exp_rel_n(a[0], order(a[1])?) },
        "alpha_n" => { want(2)?; moremath::alpha_n(order(a[0])?, a[1]) },
        "alpha_prime_n" => { want(2)?; moremath::alpha_prime_n(order(a[0])?, a[1]) },
        "beta_n" => { want(2)?; moremath::beta_n(order(a[0])?, a[1]) },
        "kummer" => { want(3)?; moremath::kummer(order(a[0])?, order(a[1])?, a[2]) },
        "gamma_star" => { want(2)?; moremath::gamma_star(a[0], a[1]) },
        "igamma" => { want(1)?; moremath::igamma(a[0]) },
        "psi" => { want(1)?; moremath::psi(a[0]) },
        "sech" => { want(1)?; moremath::sech(a[0]) },
        "pochhammer" => { want(2)?; moremath::pochhammer(a[0], order(a[1])?) },
        "falling_factorial" => { want(2)?; moremath::falling_factorial(a[0], order(a[1])?) },
        "carlson_rf" => { want(3)?; moremath::carlson_rf(a[0], a[1], a[2]) },
        "carlson_rc" => { want(2)?; moremath::carlson_rc(a[0], a[1]) },
        "carlson_rj" => { want(4)?; moremath::carlson_rj(a[0], a[1], a[2], a[3]) },
        "carlson_rd" => { want(3)?; moremath::carlson_rd(a[0], a[1], a[2]) },
        "carlson_rg" => { want(3)?; moremath::carlson_rg(a[0], a[1], a[2]) },
        "elliptic_k" => { want(1)?; moremath::elliptic_k(a[0]) },
        "elliptic_e" => { want(1)?; moremath::elliptic_e(a[0]) },
        "elliptic_f_phi" => { want(2)?; moremath::elliptic_f_phi(a[0], a[1]) },
        "elliptic_e_phi" => { want(2)?; moremath::elliptic_e_phi(a[0], a[1]) },
        "elliptic_pi" => { want(2)?; moremath::elliptic_pi(a[0], a[1]) },
        "erf" => { want(1)?; moremath::erf(a[0]) },
        "erfc" => { want(1)?; moremath::erfc(a[0]) },
        "erfcx" => { want(1)?; moremath::erfcx(a[0]) },
        "erfi" => { want(1)?; moremath::erfi(a[0]) },
        "dawson" => { want(1)?; moremath::dawson(a[0]) },
        "bessel_knu" => { want(2)?; moremath::bessel_knu(a[0], a[1]) },
        "bessel_knu_scaled" => { want(2)?; moremath::bessel_knu_scaled(a[0], a[1]) },
        "gauss_pdf" => { want(3)?; moremath::gauss_pdf(a[0], a[1], a[2]) },
        "gauss_cdf" => { want(3)?; moremath::gauss_cdf(a[0], a[1], a[2]) },
        "student_cdf" => { want(2)?; moremath::student_cdf(a[0], a[1]) },
        "probit" => { want(1)?; moremath::probit(a[0]) },
        "owen" => { want(2)?; moremath::owen(a[0], a[1]) },
        "gaussian_integral" => { want(4)?; moremath::gaussian_integral(a[0], a[1], a[2], a[3]) },
        "barrier_factor" => { want(2)?; moremath::barrier_factor(a[0], order(a[1])?) },
        "triangle" => { want(3)?; moremath::triangle(a[0], a[1], a[2]) },
        "phasespace2" => { want(3)?; moremath::phasespace2(a[0], a[1], a[2]) },
        "phasespace3" => { want(4)?; moremath::phasespace3(a[0], a[1], a[2], a[3]) },
        other => return Err(format!("unknown function \"{}\"", other)),
    })
}


fn main() {
    let matches = clap::Command::new("eval")
        .version(clap::crate_version!())
        .about("Evaluate a single special-function call")
        .arg(clap::Arg::new("EXPR")
             .help("The call to evaluate, e.g. \"kummer(2, 5, -1.5)\"")
             .required(true)
             .index(1))
        .get_matches();

    let expr = matches.get_one::<String>("EXPR").unwrap();
    let call = Regex::new(r"^\s*([a-z_0-9]+)\s*\(([^)]*)\)\s*$").unwrap();

    let caps = match call.captures(expr) {
        Some(c) => c,
        None => {
            eprintln!("error: cannot parse \"{}\" as a function call", expr);
            process::exit(1);
        }
    };

    let mut args = Vec::new();

    for piece in caps[2].split(',').map(|s| s.trim()).filter(|s| !s.is_empty()) {
        match piece.parse::<f64>() {
            Ok(v) => args.push(v),
            Err(e) => {
                eprintln!("error: bad argument \"{}\": {}", piece, e);
                process::exit(1);
            }
        }
    }

    match evaluate(&caps[1], &args) {
        Ok(v) => println!("{:.16e}", v),
        Err(e) => {
            eprintln!("error: {}", e);
            process::exit(1);
        }
    }
}
