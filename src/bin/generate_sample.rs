//! Weekly all-cause death counts in the StatCan 13100768 layout, BOM and
//! all, so the default `mortality-plot` invocation has something to chew on.

use std::io::Write;

use chrono::{Days, NaiveDate};

const OUTPUT: &str = "13100768.csv";
const WEEKS: u64 = 110;

// (region, DGUID, baseline weekly deaths at all ages / both sexes)
const REGIONS: [(&str, &str, f64); 5] = [
    ("Canada", "2016A000011124", 5600.0),
    ("Quebec", "2016A000224", 1300.0),
    ("Ontario", "2016A000235", 2100.0),
    ("Nova Scotia", "2016A000212", 170.0),
    ("New Brunswick", "2016A000213", 150.0),
];

const AGES: [(&str, f64); 4] = [
    ("Age at time of death, all ages", 1.0),
    ("Age at time of death, 0 to 44 years", 0.06),
    ("Age at time of death, 45 to 64 years", 0.16),
    ("Age at time of death, 65 years and over", 0.78),
];

const SEXES: [(&str, f64); 3] = [
    ("Both sexes", 1.0),
    ("Males", 0.51),
    ("Females", 0.49),
];

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }
}

/// Winter-peaking seasonal baseline plus noise, floored at zero.
fn weekly_count(baseline: f64, week: u64, rng: &mut SimpleRng) -> i64 {
    let phase = week as f64 / 52.0 * 2.0 * std::f64::consts::PI;
    let seasonal = baseline * (1.0 + 0.12 * phase.cos());
    rng.gauss(seasonal, baseline * 0.03).round().max(0.0) as i64
}

fn main() {
    let mut rng = SimpleRng::new(42);
    let start = NaiveDate::from_ymd_opt(2020, 1, 4).expect("valid start date");

    let mut file = std::fs::File::create(OUTPUT).expect("Failed to create output file");
    // StatCan exports lead with a UTF-8 byte-order marker.
    file.write_all("\u{feff}".as_bytes())
        .expect("Failed to write BOM");
    let mut writer = csv::Writer::from_writer(file);

    writer
        .write_record([
            "REF_DATE",
            "GEO",
            "DGUID",
            "Age at time of death",
            "Sex",
            "Characteristics",
            "UOM",
            "VALUE",
        ])
        .expect("Failed to write header");

    let mut rows = 0u64;
    for week in 0..WEEKS {
        let date = (start + Days::new(7 * week)).format("%Y-%m-%d").to_string();
        for (region, dguid, baseline) in REGIONS {
            let geo = format!("{region}, place of occurrence");
            for (age, age_share) in AGES {
                for (sex, sex_share) in SEXES {
                    let count = weekly_count(baseline * age_share * sex_share, week, &mut rng);
                    // Sparse cells in the real export are simply empty.
                    let value = if rng.next_f64() < 0.002 {
                        String::new()
                    } else {
                        count.to_string()
                    };
                    writer
                        .write_record([
                            date.as_str(),
                            geo.as_str(),
                            dguid,
                            age,
                            sex,
                            "Number of deaths",
                            "Number",
                            value.as_str(),
                        ])
                        .expect("Failed to write row");
                    rows += 1;
                }
            }
        }
    }
    writer.flush().expect("Failed to flush output");

    println!(
        "Wrote {rows} rows ({WEEKS} weeks, {} regions) to {OUTPUT}",
        REGIONS.len()
    );
}
