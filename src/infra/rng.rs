use crate::engine::RandomSource;

/// Fisher–Yates поверх переданного генератора индексов.
/// Обе реализации RandomSource тасуют через него — различается
/// только источник случайности.
fn fisher_yates<T, R: rand::Rng>(slice: &mut [T], rng: &mut R) {
    for i in (1..slice.len()).rev() {
        let j = rng.gen_range(0..=i);
        slice.swap(i, j);
    }
}

/// Боевой источник случайности процесса.
///
/// Индексы тасовки тянутся из `thread_rng` — CSPRNG с reseed'ом от ОС,
/// чего спецификации тасовки достаточно; сид раздачи наружу не
/// отдаётся. Если энтропии нет, `thread_rng` паникует, и раздача
/// не стартует — это и есть требуемый фатальный отказ.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemRng;

impl RandomSource for SystemRng {
    fn shuffle<T>(&mut self, slice: &mut [T]) {
        fisher_yates(slice, &mut rand::thread_rng());
    }

    fn next_unit(&mut self) -> f64 {
        use rand::Rng;
        rand::thread_rng().gen()
    }
}

/// Воспроизводимый источник: фиксированный seed — фиксированная
/// последовательность тасовок и бросков. Нужен тестам и реплею
/// сценариев.
#[derive(Clone, Debug)]
pub struct DeterministicRng(rand::rngs::StdRng);

impl DeterministicRng {
    pub fn from_seed(seed: u64) -> Self {
        use rand::SeedableRng;
        Self(rand::rngs::StdRng::seed_from_u64(seed))
    }
}

impl RandomSource for DeterministicRng {
    fn shuffle<T>(&mut self, slice: &mut [T]) {
        fisher_yates(slice, &mut self.0);
    }

    fn next_unit(&mut self) -> f64 {
        use rand::Rng;
        self.0.gen()
    }
}
