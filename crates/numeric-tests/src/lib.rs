// Randomized accuracy tests for the solvers live in tests/.
