// Serialization round trips live in tests/.
