//! End-to-end scenarios through the public pipeline API.

use bigomap::core::ComplexityLevel;
use bigomap::function::{AnalyzerOptions, CollapsePolicy};
use bigomap::Pipeline;
use indoc::indoc;
use pretty_assertions::assert_eq;

fn analyze(source: &str) -> bigomap::AnalysisResult {
    Pipeline::default().analyze(source)
}

#[test]
fn bubble_sort_quadratic_constant_space() {
    let code = indoc! {"
        def bubble_sort(arr):
            n = len(arr)
            for i in range(n):
                for j in range(n - i - 1):
                    if arr[j] > arr[j + 1]:
                        arr[j], arr[j + 1] = arr[j + 1], arr[j]
    "};
    let result = analyze(code);
    assert_eq!(result.time_complexity, "O(n²)");
    assert_eq!(result.space_complexity, "O(1)");
    assert_eq!(result.complexity_level, ComplexityLevel::High);
    assert_eq!(result.worst_time_functions, vec!["bubble_sort"]);
}

#[test]
fn merge_sort_linearithmic_linear_space() {
    let code = indoc! {"
        def merge_sort(arr):
            if len(arr) <= 1:
                return arr
            mid = len(arr) // 2
            left = merge_sort(arr[:mid])
            right = merge_sort(arr[mid:])
            return merge(left, right)
    "};
    let result = analyze(code);
    assert_eq!(result.time_complexity, "O(n log n)");
    assert_eq!(result.space_complexity, "O(n)");
}

#[test]
fn binary_search_in_c_goes_through_lexical_path() {
    let code = indoc! {"
        int binary_search(int arr[], int n, int target) {
            int left = 0;
            int right = n - 1;
            while (left <= right) {
                int mid = (left + right) / 2;
                if (arr[mid] == target) return mid;
                if (arr[mid] < target) left = mid + 1;
                else right = mid - 1;
            }
            return -1;
        }
    "};
    let result = analyze(code);
    assert_eq!(result.engine, "lexical heuristics");
    assert_eq!(result.time_complexity, "O(log n)");
}

#[test]
fn naive_fibonacci_exponential_with_linear_stack() {
    let code = indoc! {"
        def fibonacci(n):
            if n <= 1:
                return n
            return fibonacci(n - 1) + fibonacci(n - 2)
    "};
    let result = analyze(code);
    assert_eq!(result.time_complexity, "O(2ⁿ)");
    assert_eq!(result.space_complexity, "O(n)");
    assert_eq!(result.complexity_level, ComplexityLevel::VeryHigh);
}

#[test]
fn backtracking_permutations_factorial() {
    let code = indoc! {"
        def permutations(arr, start=0):
            if start == len(arr) - 1:
                print(arr)
                return
            for i in range(start, len(arr)):
                arr[start], arr[i] = arr[i], arr[start]
                permutations(arr, start + 1)
                arr[start], arr[i] = arr[i], arr[start]
    "};
    let result = analyze(code);
    assert_eq!(result.time_complexity, "O(n!)");
}

#[test]
fn graph_dfs_is_linear_in_vertices_and_edges_not_factorial() {
    let code = indoc! {"
        def dfs(graph, node, visited):
            visited.add(node)
            for neighbor in graph[node]:
                if neighbor not in visited:
                    dfs(graph, neighbor, visited)
    "};
    let result = analyze(code);
    assert_eq!(result.time_complexity, "O(V + E)");
    assert_eq!(result.space_complexity, "O(V)");
}

#[test]
fn fixed_literal_bounds_never_scale() {
    let code = indoc! {"
        def warmup():
            total = 0
            for i in range(10):
                for j in range(10):
                    total += i * j
            return total
    "};
    let result = analyze(code);
    assert_eq!(result.time_complexity, "O(1)");
    assert_eq!(result.complexity_level, ComplexityLevel::Low);
}

#[test]
fn intrinsic_policy_reports_nominal_shape() {
    let code = indoc! {"
        def warmup():
            for i in range(10):
                for j in range(10):
                    print(i, j)
    "};
    let pipeline = Pipeline::new(AnalyzerOptions {
        collapse: CollapsePolicy::Intrinsic,
    });
    let result = pipeline.analyze(code);
    assert_eq!(result.time_complexity, "O(n²)");
}

#[test]
fn worst_case_is_max_across_functions_never_product() {
    let code = indoc! {"
        def linear(items):
            for x in items:
                print(x)

        def quadratic(items):
            for x in items:
                for y in items:
                    print(x, y)
    "};
    let result = analyze(code);
    assert_eq!(result.time_complexity, "O(n²)");
    assert_eq!(result.worst_time_functions, vec!["quadratic"]);
    assert_eq!(result.functions.len(), 2);
}

#[test]
fn mentioning_permutation_in_a_name_does_not_force_factorial() {
    let code = indoc! {"
        def count_permutation_rows(rows):
            total = 0
            for row in rows:
                total += 1
            return total
    "};
    let result = analyze(code);
    assert_eq!(result.time_complexity, "O(n)");
}

#[test]
fn javascript_snippet_routes_to_lexical_path() {
    let code = indoc! {"
        function sumAll(items) {
            let total = 0;
            for (let i = 0; i < items.length; i++) {
                total += items[i];
            }
            return total;
        }
    "};
    let result = analyze(code);
    assert_eq!(result.engine, "lexical heuristics");
    assert_eq!(result.time_complexity, "O(n)");
}
