//! Machine learning libraries, notebooks and hosted model APIs.

use crate::stack::signature::TechSignature;

pub const SIGNATURES: &[TechSignature] = &[
    // Python
    TechSignature::language("Python")
        .files(&["pyproject.toml", "requirements.txt", "Pipfile"])
        .extensions(&[".py"]),
    TechSignature::language("Mojo").extensions(&[".mojo", ".🔥"]),
    TechSignature::framework("FastAPI").dependencies(&["fastapi"]),
    TechSignature::framework("Django").files(&["manage.py"]),
    TechSignature::tool("Poetry").files(&["poetry.lock"]),
    TechSignature::tool("LangChain").dependencies(&["langchain"]),
    TechSignature::tool("LlamaIndex").dependencies(&["llama-index"]),
    TechSignature::tool("PyTorch").files(&["requirements.txt"]).dependencies(&["torch"]),

    // ML libraries
    TechSignature::tool("CUDA").files(&["CMakeLists.txt"]).extensions(&[".cu", ".cuh"]),
    TechSignature::tool("TensorFlow").dependencies(&["@tensorflow/tfjs", "tensorflow"]),
    TechSignature::tool("Keras").dependencies(&["keras"]),
    TechSignature::tool("Scikit-learn").dependencies(&["scikit-learn", "sklearn"]),
    TechSignature::tool("Pandas").dependencies(&["pandas"]),
    TechSignature::tool("NumPy").dependencies(&["numpy"]),
    TechSignature::tool("Matplotlib").dependencies(&["matplotlib"]),
    TechSignature::tool("JAX").dependencies(&["jax"]),
    TechSignature::tool("ONNX").dependencies(&["onnx", "onnxruntime"]),
    TechSignature::tool("OpenAI").dependencies(&["openai"]),
    TechSignature::tool("Anthropic").dependencies(&["@anthropic-ai/sdk"]),
    TechSignature::tool("Hugging Face").dependencies(&["@huggingface/inference", "transformers"]),
    TechSignature::tool("Mistral AI").dependencies(&["@mistralai/mistralai"]),
    TechSignature::tool("Ollama").dependencies(&["ollama"]),
    TechSignature::tool("Pinecone").dependencies(&["@pinecone-database/pinecone"]),

    // Notebooks
    TechSignature::tool("Jupyter").extensions(&[".ipynb"]),

    // Hosted model APIs
    TechSignature::tool("Groq").dependencies(&["groq-sdk"]),
    TechSignature::tool("Cohere").dependencies(&["cohere-ai"]),
    TechSignature::tool("DeepSeek").dependencies(&["deepseek"]),
    TechSignature::tool("Replicate").dependencies(&["replicate"]),
    TechSignature::tool("Stability AI").dependencies(&["stability-client"]),
];
