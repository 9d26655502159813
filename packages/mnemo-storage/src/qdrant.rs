use qdrant_client::{
	client::Payload,
	qdrant::{
		Condition, CreateCollectionBuilder, DeletePointsBuilder, Distance, Filter, PointStruct,
		Query, QueryPointsBuilder, UpsertPointsBuilder, VectorParamsBuilder,
		point_id::PointIdOptions,
	},
};
use uuid::Uuid;

use crate::Result;
use mnemo_domain::CollectionKind;

pub struct QdrantStore {
	pub client: qdrant_client::Qdrant,
	pub collection_prefix: String,
	pub vector_dim: u32,
}
impl QdrantStore {
	pub fn new(cfg: &mnemo_config::Qdrant) -> Result<Self> {
		let client = qdrant_client::Qdrant::from_url(&cfg.url).build()?;

		Ok(Self {
			client,
			collection_prefix: cfg.collection_prefix.clone(),
			vector_dim: cfg.vector_dim,
		})
	}

	pub fn collection_name(&self, kind: CollectionKind) -> String {
		format!("{}_{}", self.collection_prefix, kind.as_str())
	}

	/// Creates any missing collection. All collections share one dimension
	/// and metric so scores stay comparable across them.
	pub async fn ensure_collections(&self) -> Result<()> {
		for kind in CollectionKind::ALL {
			let name = self.collection_name(kind);

			if self.client.collection_exists(&name).await? {
				continue;
			}

			let builder = CreateCollectionBuilder::new(&name).vectors_config(
				VectorParamsBuilder::new(u64::from(self.vector_dim), Distance::Cosine),
			);

			if let Err(err) = self.client.create_collection(builder).await {
				// A concurrent bootstrap may have won the race.
				if !self.client.collection_exists(&name).await? {
					return Err(err.into());
				}
			}
		}

		Ok(())
	}

	pub async fn upsert_vector(
		&self,
		kind: CollectionKind,
		record_id: Uuid,
		owner_id: Uuid,
		vector: Vec<f32>,
	) -> Result<()> {
		let mut payload = Payload::new();

		payload.insert("record_id", record_id.to_string());
		payload.insert("owner_id", owner_id.to_string());

		let point = PointStruct::new(record_id.to_string(), vector, payload);
		let upsert =
			UpsertPointsBuilder::new(self.collection_name(kind), vec![point]).wait(true);

		self.client.upsert_points(upsert).await?;

		Ok(())
	}

	/// Top-k nearest neighbors in one collection, best first.
	pub async fn search(
		&self,
		kind: CollectionKind,
		vector: &[f32],
		k: u32,
	) -> Result<Vec<(Uuid, f32)>> {
		let search = QueryPointsBuilder::new(self.collection_name(kind))
			.query(Query::new_nearest(vector.to_vec()))
			.limit(u64::from(k))
			.with_payload(false);
		let response = self.client.query(search).await?;
		let mut hits = Vec::with_capacity(response.result.len());

		for point in response.result {
			let Some(id) = point.id.as_ref().and_then(point_id_to_uuid) else {
				continue;
			};

			hits.push((id, point.score));
		}

		Ok(hits)
	}

	pub async fn delete_vector(&self, kind: CollectionKind, record_id: Uuid) -> Result<()> {
		let filter = Filter::must([Condition::matches("record_id", record_id.to_string())]);
		let delete =
			DeletePointsBuilder::new(self.collection_name(kind)).points(filter).wait(true);

		self.client.delete_points(delete).await?;

		Ok(())
	}
}

fn point_id_to_uuid(point_id: &qdrant_client::qdrant::PointId) -> Option<Uuid> {
	match &point_id.point_id_options {
		Some(PointIdOptions::Uuid(id)) => Uuid::parse_str(id).ok(),
		_ => None,
	}
}
