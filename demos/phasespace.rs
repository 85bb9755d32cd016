// Copyright 2017-2018 Peter Williams <peter@newton.cx> and collaborators
// Licensed under the GPL version 3.

/// Print two- and three-body phase space over a scan of the parent mass.

extern crate clap;
extern crate moremath;


fn main() {
    let matches = clap::Command::new("phasespace")
        .version(clap::crate_version!())
        .about("Scan two- and three-body phase space in the parent mass")
        .arg(clap::Arg::new("M1")
             .help("Mass of the first daughter")
             .required(true)
             .value_parser(clap::value_parser!(f64))
             .index(1))
        .arg(clap::Arg::new("M2")
             .help("Mass of the second daughter")
             .required(true)
             .value_parser(clap::value_parser!(f64))
             .index(2))
        .arg(clap::Arg::new("M3")
             .help("Mass of the third daughter")
             .required(true)
             .value_parser(clap::value_parser!(f64))
             .index(3))
        .arg(clap::Arg::new("MAX")
             .help("The largest parent mass to scan to")
             .required(true)
             .value_parser(clap::value_parser!(f64))
             .index(4))
        .arg(clap::Arg::new("n")
             .short('n')
             .long("points")
             .help("The number of scan points")
             .default_value("50")
             .value_parser(clap::value_parser!(usize)))
        .get_matches();

    let m1 = *matches.get_one::<f64>("M1").unwrap();
    let m2 = *matches.get_one::<f64>("M2").unwrap();
    let m3 = *matches.get_one::<f64>("M3").unwrap();
    let max = *matches.get_one::<f64>("MAX").unwrap();
    let n = *matches.get_one::<usize>("n").unwrap();

    // Start the scan at the two-body threshold of the first pair.
    let low = m1 + m2;

    println!("# x\tphasespace2(x, m1, m2)\tphasespace2_bk\tphasespace3(x, m1, m2, m3)");

    for i in 1..=n {
        let x = low + (max - low) * i as f64 / n as f64;
        println!("{:.16e}\t{:.16e}\t{:.16e}\t{:.16e}", x,
                 moremath::phasespace2(x, m1, m2),
                 moremath::phasespace2_bk(x, m1, m2),
                 moremath::phasespace3(x, m1, m2, m3));
    }
}
