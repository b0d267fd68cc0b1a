use crate::embedder::Embedder;
use crate::error::EmbedError;

#[derive(Debug, Clone)]
pub struct Ranking {
    pub order: Vec<usize>,
    pub scores: Vec<f32>,
}

pub struct CandidateRanker<E: Embedder> {
    embedder: E,
}

impl<E: Embedder> CandidateRanker<E> {
    pub fn new(embedder: E) -> Self {
        Self { embedder }
    }

    pub fn rank(&self, job_description: &str, resumes: &[String]) -> Result<Ranking, EmbedError> {
        let job_vector = self.embedder.embed(job_description)?;

        let texts: Vec<&str> = resumes.iter().map(String::as_str).collect();
        let resume_vectors = self.embedder.embed_batch(&texts)?;

        let scores: Vec<f32> = resume_vectors
            .iter()
            .map(|vector| cosine_similarity(&job_vector, vector))
            .collect();

        // Vec::sort_by is stable, so equal scores keep upload order.
        let mut order: Vec<usize> = (0..scores.len()).collect();
        order.sort_by(|&left, &right| scores[right].total_cmp(&scores[left]));

        Ok(Ranking { order, scores })
    }
}

pub fn cosine_similarity(left: &[f32], right: &[f32]) -> f32 {
    let dot: f32 = left.iter().zip(right).map(|(a, b)| a * b).sum();
    let left_norm = left.iter().map(|value| value * value).sum::<f32>().sqrt();
    let right_norm = right.iter().map(|value| value * value).sum::<f32>().sqrt();

    if left_norm == 0.0 || right_norm == 0.0 {
        return 0.0;
    }

    dot / (left_norm * right_norm)
}

#[cfg(test)]
mod tests {
    use super::{cosine_similarity, CandidateRanker, Ranking};
    use crate::embedder::{Embedder, HashedNgramEmbedder};
    use crate::error::EmbedError;

    struct FixedScoreEmbedder {
        job_vector: Vec<f32>,
        resume_vectors: Vec<Vec<f32>>,
    }

    impl Embedder for FixedScoreEmbedder {
        fn dimensions(&self) -> usize {
            self.job_vector.len()
        }

        fn embed(&self, _text: &str) -> Result<Vec<f32>, EmbedError> {
            Ok(self.job_vector.clone())
        }

        fn embed_batch(&self, _texts: &[&str]) -> Result<Vec<Vec<f32>>, EmbedError> {
            Ok(self.resume_vectors.clone())
        }
    }

    fn resumes(count: usize) -> Vec<String> {
        (0..count).map(|index| format!("resume {index}")).collect()
    }

    #[test]
    fn cosine_of_identical_vectors_is_one() {
        let value = cosine_similarity(&[1.0, 2.0, 3.0], &[1.0, 2.0, 3.0]);
        assert!((value - 1.0).abs() < 1e-6);
    }

    #[test]
    fn cosine_of_orthogonal_vectors_is_zero() {
        let value = cosine_similarity(&[1.0, 0.0], &[0.0, 1.0]);
        assert!(value.abs() < 1e-6);
    }

    #[test]
    fn cosine_with_zero_vector_is_zero() {
        assert_eq!(cosine_similarity(&[0.0, 0.0], &[1.0, 1.0]), 0.0);
        assert_eq!(cosine_similarity(&[1.0, 1.0], &[0.0, 0.0]), 0.0);
    }

    #[test]
    fn ranking_orders_scores_descending() {
        let ranker = CandidateRanker::new(FixedScoreEmbedder {
            job_vector: vec![1.0, 0.0],
            resume_vectors: vec![
                vec![0.0, 1.0],
                vec![1.0, 0.0],
                vec![1.0, 1.0],
            ],
        });

        let Ranking { order, scores } = ranker.rank("job", &resumes(3)).unwrap();

        assert_eq!(order, vec![1, 2, 0]);
        assert_eq!(scores.len(), 3);
        for pair in order.windows(2) {
            assert!(scores[pair[0]] >= scores[pair[1]]);
        }
    }

    #[test]
    fn scores_stay_indexed_by_upload_position() {
        let ranker = CandidateRanker::new(FixedScoreEmbedder {
            job_vector: vec![1.0, 0.0],
            resume_vectors: vec![vec![0.0, 1.0], vec![1.0, 0.0]],
        });

        let ranking = ranker.rank("job", &resumes(2)).unwrap();

        assert!(ranking.scores[0].abs() < 1e-6);
        assert!((ranking.scores[1] - 1.0).abs() < 1e-6);
        assert_eq!(ranking.order, vec![1, 0]);
    }

    #[test]
    fn equal_scores_preserve_upload_order() {
        let ranker = CandidateRanker::new(FixedScoreEmbedder {
            job_vector: vec![1.0, 0.0],
            resume_vectors: vec![
                vec![2.0, 0.0],
                vec![3.0, 0.0],
                vec![0.0, 1.0],
            ],
        });

        let ranking = ranker.rank("job", &resumes(3)).unwrap();

        // Both cosine-identical resumes score 1.0; index 0 stays ahead.
        assert_eq!(ranking.order, vec![0, 1, 2]);
    }

    #[test]
    fn ranking_is_a_permutation() {
        let embedder = HashedNgramEmbedder::default();
        let ranker = CandidateRanker::new(embedder);
        let batch = vec![
            "Rust engineer with tokio and axum".to_string(),
            "Accountant, spreadsheets and audits".to_string(),
            "Kernel developer, C and Rust".to_string(),
            String::new(),
        ];

        let ranking = ranker.rank("Rust backend developer", &batch).unwrap();

        let mut seen = ranking.order.clone();
        seen.sort_unstable();
        assert_eq!(seen, vec![0, 1, 2, 3]);
    }

    #[test]
    fn empty_batch_ranks_to_empty_result() {
        let ranker = CandidateRanker::new(HashedNgramEmbedder::default());
        let ranking = ranker.rank("job description", &[]).unwrap();

        assert!(ranking.order.is_empty());
        assert!(ranking.scores.is_empty());
    }
}
