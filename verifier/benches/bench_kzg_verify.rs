use ark_bn254::Fr;
use ark_ff::UniformRand;
use bitvec_kzg_primitives::{bitvector::BitVector, domain::Domain, proof::Claims, srs::SRS};
use bitvec_kzg_prover::{assembler::prove, kzg::KZG};
use bitvec_kzg_verifier::{proof::verify, verify::verify_opening_proof};
use criterion::{criterion_group, criterion_main, Criterion};
use rand::Rng;
use std::time::Duration;

fn bench_kzg_verify(c: &mut Criterion) {
    let mut rng = rand::thread_rng();
    let srs = SRS::unsafe_setup(Fr::rand(&mut rng), 4096);
    let kzg = KZG::new(&srs);

    for size in [1024usize, 4096] {
        let bits: Vec<bool> = (0..size).map(|_| rng.gen_bool(0.5)).collect();
        let vector = BitVector::from_bits(&bits).unwrap();

        c.bench_function(&format!("bench_kzg_verify_opening_{size}"), |b| {
            let domain = Domain::new(size).unwrap();
            let poly = vector
                .to_polynomial_eval_form()
                .unwrap()
                .to_coeff_form(&domain)
                .unwrap();
            let commitment = kzg.commit_coeff_form(&poly).unwrap();
            let index = rng.gen_range(0..size);
            let opening = kzg.open_at_index(&poly, &domain, index).unwrap();
            b.iter(|| verify_opening_proof(&commitment, &opening, &srs));
        });

        for openings in [1usize, 16, 64] {
            let indices: Vec<usize> = (0..openings).map(|_| rng.gen_range(0..size)).collect();
            let proof = prove(&srs, &vector, &indices).unwrap();
            let claims: Claims = indices.iter().map(|&i| (i, bits[i])).collect();
            c.bench_function(
                &format!("bench_verify_bit_vector_{size}_{openings}_openings"),
                |b| b.iter(|| verify(&proof, &srs, &claims).unwrap()),
            );
        }
    }
}

fn criterion_config() -> Criterion {
    Criterion::default()
        .warm_up_time(Duration::from_secs(5))
        .measurement_time(Duration::from_secs(10))
        .sample_size(10)
}

criterion_group!(
    name = benches;
    config = criterion_config();
    targets = bench_kzg_verify
);
criterion_main!(benches);
