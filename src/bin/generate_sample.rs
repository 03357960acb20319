use std::error::Error;

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

    fn pick<'a>(&mut self, items: &[&'a str]) -> &'a str {
        items[(self.next_u64() % items.len() as u64) as usize]
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }
}

const ADJECTIVES: &[&str] = &[
    "Silent", "Crimson", "Last", "Broken", "Golden", "Hidden", "Wild", "Eternal", "Lost", "Iron",
];
const NOUNS: &[&str] = &[
    "River", "Empire", "Promise", "Horizon", "Garden", "Witness", "Harbor", "Dream", "Frontier",
    "Machine",
];
const GENRES: &[&str] = &["Drama", "Crime", "Action", "Comedy", "Adventure", "Animation", "Biography"];
const CERTIFICATES: &[&str] = &["U", "UA", "A", "PG-13", "R"];

fn main() -> Result<(), Box<dyn Error>> {
    let mut rng = SimpleRng::new(42);
    let output_path = "sample_movies.csv";
    let n_movies = 1000;

    let mut writer = csv::Writer::from_path(output_path)?;
    writer.write_record([
        "Series_Title",
        "Released_Year",
        "Certificate",
        "Runtime",
        "Genre",
        "IMDB_Rating",
        "Meta_score",
        "No_of_Votes",
        "Gross",
        "Color",
    ])?;

    for i in 0..n_movies {
        let title = format!("The {} {} {}", rng.pick(ADJECTIVES), rng.pick(NOUNS), i + 1);
        let year = 1930 + (rng.next_f64() * 92.0) as i64;
        let runtime = rng.gauss(122.0, 28.0).clamp(45.0, 320.0).round() as i64;
        let rating = (rng.gauss(7.9, 0.28).clamp(7.6, 9.3) * 10.0).round() / 10.0;

        // Better-rated movies collect more votes and gross.
        let popularity = (rating - 7.5) * rng.gauss(1.0, 0.3).abs();
        let votes = (25_000.0 + popularity * 600_000.0 * rng.next_f64()).round() as i64;
        let gross = votes as f64 * rng.gauss(180.0, 60.0).abs();

        // Like the real data, some scores and grosses are missing.
        let meta_score = if rng.next_f64() < 0.15 {
            String::new()
        } else {
            format!("{}", (rng.gauss(78.0, 12.0).clamp(28.0, 100.0)) as i64)
        };
        let gross = if rng.next_f64() < 0.17 {
            String::new()
        } else {
            format!("{gross:.0}")
        };
        let color = if year < 1960 && rng.next_f64() < 0.6 {
            "false"
        } else {
            "true"
        };

        writer.write_record([
            title,
            year.to_string(),
            rng.pick(CERTIFICATES).to_string(),
            runtime.to_string(),
            rng.pick(GENRES).to_string(),
            format!("{rating:.1}"),
            meta_score,
            votes.to_string(),
            gross,
            color.to_string(),
        ])?;
    }
    writer.flush()?;

    println!("Wrote {n_movies} movies to {output_path}");
    Ok(())
}
