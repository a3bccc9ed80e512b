/// Reports a broken parent/child/sibling link discovered in the middle of a splice.
#[cold]
#[inline(never)]
#[track_caller]
pub fn corrupted_tree(msg: &str) -> ! {
    // Those panics happen in a tree corruption context, so we should just abort the process to
    // prevent unwinders from collecting corrupted data
    abort_on_panic(|| panic!("tree corruption detected: {}", msg));
    unreachable!("the tree corruption panic was swallowed")
}

/// Runs the closure, exiting the process instead of unwinding if it panics while the `unwind_safety` feature is enabled.
#[inline]
#[allow(clippy::exit)]
pub fn abort_on_panic<R>(f: impl FnOnce() -> R) -> R {
    #[cfg(feature = "unwind_safety")]
    {
        std::panic::catch_unwind(
            std::panic::AssertUnwindSafe(f)
        ).unwrap_or_else(|_| std::process::exit(101))
    }
    #[cfg(not(feature = "unwind_safety"))]
    {
        f()
    }
}
