//! Statistical tests for estimation and sampling.

use std::collections::{BTreeMap, BTreeSet};

use proptest::prelude::*;
use rand::SeedableRng;
use rand::rngs::StdRng;

use pktsynth_fit::{FitError, Sampler, estimate, sample};
use pktsynth_model::{
    FittedModel, LengthStatistics, LengthStats, MASS_TOLERANCE, ProtocolDistribution, Record,
};

fn frequencies(records: &[Record]) -> BTreeMap<String, f64> {
    let mut counts: BTreeMap<String, usize> = BTreeMap::new();
    for record in records {
        *counts.entry(record.protocol.clone()).or_insert(0) += 1;
    }
    counts
        .into_iter()
        .map(|(label, count)| (label, count as f64 / records.len() as f64))
        .collect()
}

#[test]
fn protocol_frequencies_converge() {
    let dist = ProtocolDistribution::from_probabilities([("TCP", 0.7), ("UDP", 0.3)]).unwrap();
    let lengths: LengthStatistics = [
        ("TCP", LengthStats::new(800.0, 300.0, 70)),
        ("UDP", LengthStats::new(150.0, 50.0, 30)),
    ]
    .into_iter()
    .collect();
    let sampler = Sampler::new(&dist, &lengths).unwrap();
    let mut rng = StdRng::seed_from_u64(0x5eed);

    let synthetic = sampler.draw_many(100_000, &mut rng);
    let freq = frequencies(&synthetic);

    assert_eq!(synthetic.len(), 100_000);
    assert!((freq["TCP"] - 0.7).abs() < 0.01, "TCP frequency {}", freq["TCP"]);
    assert!((freq["UDP"] - 0.3).abs() < 0.01, "UDP frequency {}", freq["UDP"]);
}

#[test]
fn zero_variance_lengths_are_exact() {
    let dist = ProtocolDistribution::from_probabilities([("TCP", 0.5), ("UDP", 0.5)]).unwrap();
    let lengths: LengthStatistics = [
        ("TCP", LengthStats::new(500.0, 0.0, 10)),
        ("UDP", LengthStats::new(100.0, 0.0, 10)),
    ]
    .into_iter()
    .collect();
    let sampler = Sampler::new(&dist, &lengths).unwrap();
    let mut rng = StdRng::seed_from_u64(11);

    for record in sampler.draw_many(5_000, &mut rng) {
        match record.protocol.as_str() {
            "TCP" => assert_eq!(record.length, 500),
            "UDP" => assert_eq!(record.length, 100),
            other => panic!("unexpected protocol {other}"),
        }
    }
}

#[test]
fn sample_defaults_to_record_count() {
    let records = vec![
        Record::new("TCP", 60),
        Record::new("TCP", 1514),
        Record::new("UDP", 90),
    ];
    let model = estimate(&records).unwrap();
    let mut rng = StdRng::seed_from_u64(3);

    assert_eq!(sample(&model, None, &mut rng).unwrap().len(), 3);
    assert_eq!(sample(&model, Some(10), &mut rng).unwrap().len(), 10);
    assert!(sample(&model, Some(0), &mut rng).unwrap().is_empty());
}

#[test]
fn empty_input_is_empty_model_error() {
    assert!(matches!(estimate(&[]), Err(FitError::EmptyModel)));
}

#[test]
fn refitting_synthetic_output_recovers_model() {
    let dist = ProtocolDistribution::from_probabilities([("TCP", 0.6), ("UDP", 0.4)]).unwrap();
    let lengths: LengthStatistics = [
        ("TCP", LengthStats::new(800.0, 100.0, 60)),
        ("UDP", LengthStats::new(200.0, 30.0, 40)),
    ]
    .into_iter()
    .collect();
    let original = FittedModel::new(dist, lengths, 100).unwrap();
    let mut rng = StdRng::seed_from_u64(2024);

    let synthetic = sample(&original, Some(50_000), &mut rng).unwrap();
    let refit = estimate(&synthetic).unwrap();

    for (label, probability) in original.distribution().iter() {
        let recovered = refit.distribution().probability(label).unwrap();
        assert!((recovered - probability).abs() < 0.01, "{label}: {recovered}");

        let want = original.length_stats(label).unwrap();
        let got = refit.length_stats(label).unwrap();
        assert!((got.mean - want.mean).abs() < want.mean * 0.01, "{label} mean {}", got.mean);
        assert!(
            (got.stddev - want.stddev).abs() < want.stddev * 0.05,
            "{label} stddev {}",
            got.stddev
        );
    }
}

fn arb_records() -> impl Strategy<Value = Vec<Record>> {
    prop::collection::vec(
        (prop::sample::select(vec!["TCP", "UDP", "DNS", "ARP", "TLSv1.3"]), 0u64..65_536),
        1..200,
    )
    .prop_map(|pairs| {
        pairs
            .into_iter()
            .map(|(protocol, length)| Record::new(protocol, length))
            .collect()
    })
}

proptest! {
    #[test]
    fn distribution_mass_is_one(records in arb_records()) {
        let model = estimate(&records).unwrap();
        prop_assert!((model.distribution().total_mass() - 1.0).abs() < MASS_TOLERANCE);
    }

    #[test]
    fn keys_match_observed_protocols(records in arb_records()) {
        let model = estimate(&records).unwrap();
        let observed: BTreeSet<&str> = records.iter().map(|r| r.protocol.as_str()).collect();
        let dist_keys: BTreeSet<&str> = model.distribution().labels().collect();
        let stat_keys: BTreeSet<&str> = model.lengths().labels().collect();
        prop_assert_eq!(&dist_keys, &observed);
        prop_assert_eq!(&stat_keys, &observed);
    }

    #[test]
    fn singleton_protocols_have_zero_stddev(records in arb_records()) {
        let model = estimate(&records).unwrap();
        for (label, stats) in model.lengths().iter() {
            let support = records.iter().filter(|r| r.protocol == label).count();
            prop_assert_eq!(stats.count as usize, support);
            if support == 1 {
                prop_assert_eq!(stats.stddev, 0.0);
            }
        }
    }

    #[test]
    fn samples_have_requested_size(records in arb_records(), count in 0usize..500, seed in any::<u64>()) {
        let model = estimate(&records).unwrap();
        let mut rng = StdRng::seed_from_u64(seed);
        let synthetic = sample(&model, Some(count), &mut rng).unwrap();
        prop_assert_eq!(synthetic.len(), count);
        for record in &synthetic {
            prop_assert!(model.distribution().contains(&record.protocol));
        }
    }
}
