use lazy_static::lazy_static;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::Level;
use tracing_subscriber::{EnvFilter, prelude::*};
use tracing_timing::{Builder, Histogram};
use std::collections::HashMap;
use std::sync::Arc;
use parking_lot::RwLock;
use std::time::{Duration, Instant};
use std::cell::RefCell;

// Categories used to group timings in the report
#[derive(Hash, Eq, PartialEq, Clone, Debug)]
pub enum OperationCategory {
    Storage {
        subcategory: StorageOpType,
    },
    Editing {
        subcategory: EditingOpType,
    },
    Collections {
        subcategory: CollectionOpType,
    },
    Export,
    Other,
}

#[derive(Hash, Eq, PartialEq, Clone, Debug)]
pub enum StorageOpType {
    Load,
    Save,
    Quarantine,
}

#[derive(Hash, Eq, PartialEq, Clone, Debug)]
pub enum EditingOpType {
    Gesture,
    Commit,
}

#[derive(Hash, Eq, PartialEq, Clone, Debug)]
pub enum CollectionOpType {
    Create,
    Delete,
    View,
}

impl OperationCategory {
    pub fn as_str(&self) -> String {
        match self {
            OperationCategory::Storage { subcategory } => {
                format!("Storage - {}", match subcategory {
                    StorageOpType::Load => "Load",
                    StorageOpType::Save => "Save",
                    StorageOpType::Quarantine => "Quarantine",
                })
            },
            OperationCategory::Editing { subcategory } => {
                format!("Editing - {}", match subcategory {
                    EditingOpType::Gesture => "Gesture",
                    EditingOpType::Commit => "Commit",
                })
            },
            OperationCategory::Collections { subcategory } => {
                format!("Collections - {}", match subcategory {
                    CollectionOpType::Create => "Create",
                    CollectionOpType::Delete => "Delete",
                    CollectionOpType::View => "View",
                })
            },
            OperationCategory::Export => "Export".to_string(),
            OperationCategory::Other => "Other Operations".to_string(),
        }
    }
}

thread_local! {
    static TIMING_STACK: RefCell<Vec<(String, OperationCategory, Instant)>> = RefCell::new(Vec::new());
}

lazy_static! {
    static ref TIMING_ENABLED: AtomicBool = AtomicBool::new(false);
    static ref FUNCTION_TIMINGS: Arc<RwLock<HashMap<String, Histogram<u64>>>> = Arc::new(RwLock::new(HashMap::new()));
    static ref CATEGORY_TIMINGS: Arc<RwLock<HashMap<OperationCategory, Histogram<u64>>>> = Arc::new(RwLock::new(HashMap::new()));
    static ref HIERARCHICAL_TIMINGS: Arc<RwLock<HashMap<String, (Duration, usize, Vec<String>)>>> = Arc::new(RwLock::new(HashMap::new()));
}

// 1ns to 60s, 3 significant figures
fn new_histogram() -> Option<Histogram<u64>> {
    Histogram::<u64>::new_with_bounds(1, 60_000_000_000, 3).ok()
}

pub struct TimingGuard {
    function_name: String,
    category: OperationCategory,
    start: Instant,
}

impl Drop for TimingGuard {
    fn drop(&mut self) {
        let duration = self.start.elapsed();
        record_timing_end(&self.function_name, duration, &self.category);
    }
}

pub fn start_timing(function_name: &str, category: OperationCategory) -> TimingGuard {
    let guard = TimingGuard {
        function_name: function_name.to_string(),
        category: category.clone(),
        start: Instant::now(),
    };

    TIMING_STACK.with(|stack| {
        stack.borrow_mut().push((function_name.to_string(), category, Instant::now()));
    });

    guard
}

fn record_timing_end(function_name: &str, duration: Duration, category: &OperationCategory) {
    // Always unwind the stack so nesting stays correct if timing is toggled
    let parent = TIMING_STACK.with(|stack| {
        let mut stack = stack.borrow_mut();
        stack.pop();
        stack.last().map(|(name, _, _)| name.clone())
    });

    if !is_timing_enabled() {
        return;
    }

    let duration_ns = duration.as_nanos() as u64;

    {
        let mut hierarchical = HIERARCHICAL_TIMINGS.write();
        let entry = hierarchical
            .entry(function_name.to_string())
            .or_insert((Duration::from_nanos(0), 0, Vec::new()));

        entry.0 += duration;
        entry.1 += 1;

        if let Some(parent_name) = parent {
            if !entry.2.contains(&parent_name) {
                entry.2.push(parent_name);
            }
        }
    }

    {
        let mut timings = FUNCTION_TIMINGS.write();
        if !timings.contains_key(function_name) {
            if let Some(histogram) = new_histogram() {
                timings.insert(function_name.to_string(), histogram);
            }
        }
        if let Some(histogram) = timings.get_mut(function_name) {
            let _ = histogram.record(duration_ns);
        }
    }

    {
        let mut category_timings = CATEGORY_TIMINGS.write();
        if !category_timings.contains_key(category) {
            if let Some(histogram) = new_histogram() {
                category_timings.insert(category.clone(), histogram);
            }
        }
        if let Some(histogram) = category_timings.get_mut(category) {
            let _ = histogram.record(duration_ns);
        }
    }
}

pub fn init_logging(enable_timing: bool, debug_logging: bool) {
    TIMING_ENABLED.store(enable_timing, Ordering::SeqCst);

    let mut env_filter = EnvFilter::from_default_env()
        .add_directive(Level::WARN.into());
    if debug_logging {
        if let Ok(directive) = "mymaps=debug".parse() {
            env_filter = env_filter.add_directive(directive);
        }
    }

    let result = if enable_timing {
        let histogram = || {
            Histogram::<u64>::new_with_bounds(1, 60_000_000_000, 3).unwrap()
        };

        let timing_layer = Builder::default().layer(histogram);

        let subscriber = tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().pretty().with_writer(std::io::stderr))
            .with(timing_layer.boxed());

        tracing::subscriber::set_global_default(subscriber)
    } else {
        let subscriber = tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().pretty().with_writer(std::io::stderr));

        tracing::subscriber::set_global_default(subscriber)
    };

    if let Err(e) = result {
        eprintln!("Logging already initialised: {}", e);
    }
}

pub fn is_timing_enabled() -> bool {
    TIMING_ENABLED.load(Ordering::SeqCst)
}

pub fn print_timing_report() {
    if !is_timing_enabled() {
        return;
    }

    println!("\nDetailed Performance Report");
    println!("==========================");

    println!("\nHierarchical Timing Analysis:");
    println!("---------------------------");
    let hierarchical = HIERARCHICAL_TIMINGS.read();
    let mut entries: Vec<_> = hierarchical.iter().collect();
    entries.sort_by(|a, b| b.1.0.cmp(&a.1.0));

    for (function_name, (total_duration, count, parents)) in entries {
        let avg_duration = total_duration.div_f64(*count as f64);
        println!(
            "{}: total={:.3}ms, count={}, avg={:.3}ms{}",
            function_name,
            total_duration.as_secs_f64() * 1000.0,
            count,
            avg_duration.as_secs_f64() * 1000.0,
            if !parents.is_empty() {
                format!("\n  Called by: {}", parents.join(", "))
            } else {
                String::new()
            }
        );
    }

    println!("\nPerformance by Category:");
    println!("------------------------");
    let category_timings = CATEGORY_TIMINGS.read();
    let mut category_vec: Vec<_> = category_timings.iter().collect();
    category_vec.sort_by(|a, b| {
        let b_mean = b.1.mean();
        let a_mean = a.1.mean();
        b_mean.partial_cmp(&a_mean).unwrap_or(std::cmp::Ordering::Equal)
    });

    let total_time: f64 = category_vec.iter()
        .map(|(_, hist)| hist.mean() * (hist.len() as f64))
        .sum();

    for (category, histogram) in category_vec {
        let category_total = histogram.mean() * (histogram.len() as f64);
        let percentage = if total_time > 0.0 { (category_total / total_time) * 100.0 } else { 0.0 };
        println!(
            "{}: {:.1}% of total time\n  mean={:.3}ms, p95={:.3}ms, count={}",
            category.as_str(),
            percentage,
            histogram.mean() / 1_000_000.0,
            histogram.value_at_quantile(0.95) as f64 / 1_000_000.0,
            histogram.len(),
        );
    }

    println!("==========================\n");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_labels() {
        let save = OperationCategory::Storage { subcategory: StorageOpType::Save };
        let commit = OperationCategory::Editing { subcategory: EditingOpType::Commit };

        assert_eq!(save.as_str(), "Storage - Save");
        assert_eq!(commit.as_str(), "Editing - Commit");
        assert_eq!(OperationCategory::Export.as_str(), "Export");
    }

    #[test]
    fn nested_guards_unwind_the_stack() {
        {
            let _outer = start_timing("outer", OperationCategory::Other);
            let _inner = start_timing("inner", OperationCategory::Other);
        }

        TIMING_STACK.with(|stack| assert!(stack.borrow().is_empty()));
    }
}
