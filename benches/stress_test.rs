use std::time::{Duration, Instant};

use rand::Rng;

use uplift::{
    mine_with, MinerConfig, ScoringPolicy, Transaction, TransactionEntry,
};

fn is_bundle(token: &str) -> bool {
    token.contains('(')
}

fn generate_database(
    num_transactions: usize,
    num_items: usize,
    avg_transaction_size: usize,
) -> Vec<Transaction> {
    let mut rng = rand::thread_rng();
    let keep = avg_transaction_size as f64 / num_items as f64;

    (0..num_transactions)
        .map(|_| {
            let mut entries = Vec::new();
            for item in 0..num_items {
                let keep_check: f64 = rng.r#gen();
                if keep_check < keep {
                    let token = if item % 10 == 0 {
                        format!("(B{})", item)
                    } else {
                        format!("i{}", item)
                    };
                    let probability: f64 = 0.4 + 0.6 * rng.r#gen::<f64>();
                    entries.push(TransactionEntry::new(
                        &token,
                        rng.gen_range(1..=8),
                        rng.gen_range(1..=15),
                        probability,
                    ));
                }
            }
            Transaction::new(entries).unwrap()
        })
        .collect()
}

fn print_memory_stats() {
    #[cfg(target_os = "macos")]
    {
        use std::process::Command;
        if let Ok(output) = Command::new("ps")
            .args(&["-o", "rss=", "-p", &std::process::id().to_string()])
            .output()
        {
            if let Ok(rss) = String::from_utf8(output.stdout) {
                if let Ok(kb) = rss.trim().parse::<usize>() {
                    println!("  Memory: {} MB", kb / 1024);
                }
            }
        }
    }
}

fn stress_test_scaling() {
    println!("\n=== Scaling Stress Test ===");

    let configs = vec![
        ("10K x 50", 10_000, 50, 12),
        ("100K x 100", 100_000, 100, 15),
        ("500K x 150", 500_000, 150, 15),
        ("1M x 200", 1_000_000, 200, 12),
    ];

    for (name, num_tx, num_items, avg_size) in configs {
        println!("\nTesting: {}", name);
        println!("  Generating {} transactions...", num_tx);

        let start_gen = Instant::now();
        let database = generate_database(num_tx, num_items, avg_size);
        println!("  Generated in {:?}", start_gen.elapsed());
        print_memory_stats();

        println!("  Mining top-25 (min_support=0.5)...");
        let config = MinerConfig::new(25, 0.5);
        let start = Instant::now();

        match mine_with(&database, &config, is_bundle) {
            Ok(outcome) => {
                let elapsed = start.elapsed();
                println!("  ✓ Completed in {:?}", elapsed);
                println!("  Found {} itemsets", outcome.results.len());
                println!(
                    "  Combinations: {} attempted, {} accepted, {} pruned",
                    outcome.stats.combinations_attempted,
                    outcome.stats.combinations_accepted,
                    outcome.stats.candidates_pruned
                );
                print_memory_stats();
            }
            Err(err) => {
                println!("  ✗ Mining failed: {}", err);
            }
        }
    }
}

fn stress_test_scoring_policies() {
    println!("\n=== Scoring Policy Comparison ===");

    let configs = vec![
        ("50K x 100", 50_000, 100, 15),
        ("100K x 150", 100_000, 150, 20),
    ];

    for (name, num_tx, num_items, avg_size) in configs {
        println!("\nDataset: {}", name);
        let database = generate_database(num_tx, num_items, avg_size);
        let min_support = 0.5;

        println!("  Naive ordering:");
        let config = MinerConfig::new(25, min_support).with_scoring(ScoringPolicy::Naive);
        let start = Instant::now();
        let naive = mine_with(&database, &config, is_bundle).unwrap();
        let naive_time = start.elapsed();
        println!("    Time: {:?}", naive_time);
        println!(
            "    Attempted: {}, pruned: {}",
            naive.stats.combinations_attempted, naive.stats.candidates_pruned
        );

        println!("  Heuristic ordering:");
        let config = MinerConfig::new(25, min_support).with_scoring(ScoringPolicy::Heuristic);
        let start = Instant::now();
        let heuristic = mine_with(&database, &config, is_bundle).unwrap();
        let heuristic_time = start.elapsed();
        println!("    Time: {:?}", heuristic_time);
        println!(
            "    Attempted: {}, pruned: {}",
            heuristic.stats.combinations_attempted, heuristic.stats.candidates_pruned
        );

        let same = naive.results.len() == heuristic.results.len()
            && naive
                .results
                .iter()
                .zip(&heuristic.results)
                .all(|(a, b)| a.itemset == b.itemset && a.total_utility == b.total_utility);
        if same {
            println!("  ✓ Policies agree on the top-k set");
        } else {
            println!("  ✗ Policies disagree!");
        }

        let speedup = naive_time.as_secs_f64() / heuristic_time.as_secs_f64();
        println!("  Heuristic speedup: {:.2}x", speedup);
    }
}

fn stress_test_parallel_speedup() {
    println!("\n=== Parallel Speedup Test ===");

    let database = generate_database(200_000, 150, 20);
    let min_support = 0.5;

    println!("\nSequential:");
    let config = MinerConfig::new(25, min_support);
    let start = Instant::now();
    let sequential = mine_with(&database, &config, is_bundle).unwrap();
    let sequential_time = start.elapsed();
    println!("  Time: {:?}", sequential_time);
    print_memory_stats();

    println!("Parallel:");
    let config = MinerConfig::new(25, min_support).with_parallel(true);
    let start = Instant::now();
    let parallel = mine_with(&database, &config, is_bundle).unwrap();
    let parallel_time = start.elapsed();
    println!("  Time: {:?}", parallel_time);
    print_memory_stats();

    let same = sequential.results.len() == parallel.results.len()
        && sequential
            .results
            .iter()
            .zip(&parallel.results)
            .all(|(a, b)| a.itemset == b.itemset && a.total_utility == b.total_utility);
    if same {
        println!("  ✓ Parallel run matches sequential");
    } else {
        println!("  ✗ Parallel run diverged!");
    }

    let speedup = sequential_time.as_secs_f64() / parallel_time.as_secs_f64();
    println!("  Speedup: {:.2}x", speedup);
}

fn stress_test_low_support() {
    println!("\n=== Low Support Test ===");

    let database = generate_database(20_000, 100, 20);

    let support_levels = vec![0.5, 0.2, 0.1, 0.05, 0.01];

    for &min_support in &support_levels {
        println!("\nTesting min_support = {}", min_support);
        let config = MinerConfig::new(25, min_support);
        let start = Instant::now();

        match mine_with(&database, &config, is_bundle) {
            Ok(outcome) => {
                let elapsed = start.elapsed();
                println!("  Time: {:?}", elapsed);
                println!("  Itemsets: {}", outcome.results.len());
                println!(
                    "  Combinations attempted: {}",
                    outcome.stats.combinations_attempted
                );
                print_memory_stats();

                if outcome.stats.combinations_attempted > 10_000_000 {
                    println!("  ⚠ Candidate explosion detected!");
                }
            }
            Err(err) => {
                println!("  ✗ Failed: {}", err);
            }
        }
    }
}

fn stress_test_deadline() {
    println!("\n=== Deadline Test ===");

    let database = generate_database(500_000, 200, 20);

    for millis in [100u64, 500, 2_000] {
        println!("\nDeadline: {}ms", millis);
        let config = MinerConfig::new(50, 0.2).with_deadline(Duration::from_millis(millis));
        let start = Instant::now();
        match mine_with(&database, &config, is_bundle) {
            Ok(outcome) => {
                println!("  Returned after {:?}", start.elapsed());
                println!("  Itemsets so far: {}", outcome.results.len());
            }
            Err(err) => {
                println!("  ✗ Failed: {}", err);
            }
        }
    }
}

fn main() {
    println!("=== Top-K Utility Mining Stress Testing Suite ===");
    println!("Testing scaling limits, policy behavior, and anytime operation\n");

    stress_test_scaling();
    stress_test_scoring_policies();
    stress_test_parallel_speedup();
    stress_test_low_support();
    stress_test_deadline();

    println!("\n=== Stress Testing Complete ===");
}
