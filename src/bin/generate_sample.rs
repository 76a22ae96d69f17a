use serde_json::{Value, json};

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

    fn below(&mut self, n: u64) -> u64 {
        self.next_u64() % n
    }

    fn pick<'a>(&mut self, items: &[&'a str]) -> &'a str {
        items[self.below(items.len() as u64) as usize]
    }
}

const TAXA: [&str; 8] = [
    "Bacteria",
    "Bacteria;Actinobacteria;Actinobacteria;Actinomycetales",
    "Bacteria;Actinobacteria;Actinobacteria;Actinomycetales;Corynebacteriaceae;Corynebacterium",
    "Bacteria;Bacteroidetes;Bacteroidia;Bacteroidales;Porphyromonadaceae;Porphyromonas",
    "Bacteria;Firmicutes;Bacilli;Bacillales;Staphylococcaceae;Staphylococcus",
    "Bacteria;Firmicutes;Clostridia;Clostridiales;IncertaeSedis XI;Anaerococcus",
    "Bacteria;Firmicutes;Clostridia;Clostridiales;IncertaeSedis XI;Peptoniphilus",
    "Bacteria;Proteobacteria;Gammaproteobacteria",
];

fn generate_subject(id: u64, rng: &mut SimpleRng) -> (Value, Value) {
    let wfreq = if rng.below(8) == 0 {
        Value::Null
    } else {
        json!(rng.below(10) as f64)
    };

    let metadata = json!({
        "id": id,
        "ethnicity": rng.pick(&["Caucasian", "European", "Asian", "Unknown"]),
        "gender": rng.pick(&["F", "M"]),
        "age": (18 + rng.below(50)) as f64,
        "location": rng.pick(&["Beaufort/NC", "Chicago/IL", "Raleigh/NC", "Pittsburgh/PA"]),
        "bbtype": rng.pick(&["I", "O"]),
        "wfreq": wfreq,
    });

    // Abundances sorted descending, as the dashboard expects.
    let n_otus = 1 + rng.below(60) as usize;
    let mut observations: Vec<(u64, String, u64)> = (0..n_otus)
        .map(|_| {
            let otu_id = 1 + rng.below(3600);
            let label = TAXA[rng.below(TAXA.len() as u64) as usize].to_string();
            let value = 1 + (rng.next_f64().powi(3) * 200.0) as u64;
            (otu_id, label, value)
        })
        .collect();
    observations.sort_by(|a, b| b.2.cmp(&a.2));

    let sample = json!({
        "id": id.to_string(),
        "otu_ids": observations.iter().map(|o| o.0).collect::<Vec<_>>(),
        "sample_values": observations.iter().map(|o| o.2).collect::<Vec<_>>(),
        "otu_labels": observations.iter().map(|o| o.1.clone()).collect::<Vec<_>>(),
    });

    (metadata, sample)
}

fn main() {
    let mut rng = SimpleRng::new(42);

    let output_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "samples.json".to_string());

    let ids: Vec<u64> = (940..).take(150).collect();
    let mut metadata = Vec::with_capacity(ids.len());
    let mut samples = Vec::with_capacity(ids.len());
    for &id in &ids {
        let (meta, sample) = generate_subject(id, &mut rng);
        metadata.push(meta);
        samples.push(sample);
    }

    let doc = json!({
        "names": ids.iter().map(|id| id.to_string()).collect::<Vec<_>>(),
        "metadata": metadata,
        "samples": samples,
    });

    let file = std::fs::File::create(&output_path).expect("Failed to create output file");
    serde_json::to_writer(std::io::BufWriter::new(file), &doc).expect("Failed to write dataset");

    println!("Wrote {} samples to {output_path}", ids.len());
}
