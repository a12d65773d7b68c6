use std::io::Write;
use std::time::Instant;

use rand_wide::*;

const FIXED_SEED: u64 = 0xcafe5eed00000001;
const WIDE_LIMBS: usize = 64;

fn throughput(name: &str, mut next: impl FnMut() -> u64, count: u64) {
    let timer = Instant::now();
    let mut x: u64 = 0;
    for _ in 0 .. count {
        x = x.wrapping_add(next());
    }
    let elapsed = timer.elapsed().as_secs_f64();
    println!("{}: sum {:016x}", name, x);
    println!("{:.3} s, {:.1} Mwords/s", elapsed, count as f64 / elapsed / 1.0e6);
}

// Raw output bytes to stdout, for external statistical test suites.
fn stream(mut next: impl FnMut() -> u64) -> std::io::Result<()> {
    let mut stdout = std::io::stdout();
    let mut v: Vec<u8> = Vec::new();
    loop {
        v.extend_from_slice(&next().to_le_bytes());
        if v.len() >= 0x10000 {
            stdout.write_all(v.as_slice())?;
            v.clear();
        }
    }
}

fn main() -> std::io::Result<()> {
    let mut jsf = Jsf64::from_seed(FIXED_SEED);
    let mut mcg = WideMcg::from_seed(FIXED_SEED, WIDE_LIMBS);

    match std::env::args().nth(1).as_deref() {
        Some("stream") => stream(move || jsf.next()),
        Some("stream-wide") => stream(move || mcg.next()),
        _ => {
            throughput("Jsf64", move || jsf.next(), 100_000_000);
            throughput(
                &format!("WideMcg<{}>", WIDE_LIMBS),
                move || mcg.next(),
                100_000_000,
            );
            Ok(())
        }
    }
}
